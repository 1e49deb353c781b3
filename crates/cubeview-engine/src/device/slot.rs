/// Ownership state of one native handle.
///
/// Handles start `Unallocated`, become `Allocated` when the driver hands them
/// out and go back to `Unallocated` when taken for deletion, so a handle can be
/// released at most once and never before it exists.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Slot<T> {
    Unallocated,
    Allocated(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unallocated
    }
}

impl<T: Copy> Slot<T> {
    #[inline]
    pub fn get(&self) -> Option<T> {
        match *self {
            Slot::Allocated(handle) => Some(handle),
            Slot::Unallocated => None,
        }
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        matches!(self, Slot::Allocated(_))
    }

    /// Stores a freshly created handle and returns it.
    #[inline]
    pub fn fill(&mut self, handle: T) -> T {
        debug_assert!(!self.is_allocated(), "slot filled twice; previous handle leaked");
        *self = Slot::Allocated(handle);
        handle
    }

    /// Empties the slot, returning the handle if there was one.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        std::mem::take(self).get()
    }
}
