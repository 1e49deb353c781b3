use flume::{Receiver, Sender};

/// Rotation angle (radians) plus the pending-render flag.
///
/// Values are compared bit for bit: writing the same `f64` again schedules
/// nothing, any other bit pattern (including a different NaN) schedules
/// exactly one render until [`take_scheduled`](Self::take_scheduled) is called.
#[derive(Debug)]
pub struct RotationInput {
    value: f64,
    scheduled: bool,
    tx: Sender<f64>,
    rx: Receiver<f64>,
}

/// Producer side of a [`RotationInput`], usable from any thread.
#[derive(Debug, Clone)]
pub struct RotationHandle {
    tx: Sender<f64>,
}

impl RotationHandle {
    /// Queues `value` for the next [`RotationInput::pump`].
    ///
    /// Returns `false` once the surface owning the input has been dropped.
    pub fn set(&self, value: f64) -> bool {
        self.tx.send(value).is_ok()
    }
}

impl Default for RotationInput {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl RotationInput {
    pub fn new(initial: f64) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            value: initial,
            scheduled: false,
            tx,
            rx,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Stores `value`; returns whether it differed from the current one.
    pub fn set(&mut self, value: f64) -> bool {
        if value.to_bits() == self.value.to_bits() {
            return false;
        }
        self.value = value;
        self.scheduled = true;
        true
    }

    pub fn handle(&self) -> RotationHandle {
        RotationHandle { tx: self.tx.clone() }
    }

    /// Applies every queued value in arrival order.
    ///
    /// Returns how many of them changed the rotation.
    pub fn pump(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(value) = self.rx.try_recv() {
            if self.set(value) {
                changed += 1;
            }
        }
        changed
    }

    /// Clears and returns the pending-render flag.
    pub fn take_scheduled(&mut self) -> bool {
        std::mem::take(&mut self.scheduled)
    }
}
