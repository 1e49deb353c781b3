//! Pointer and keyboard mapping onto the rotation range.
//!
//! The rotation behaves like a slider over `[0, 2π]`: a left-button drag maps
//! the cursor's horizontal position across the window onto that range and the
//! arrow keys step through it.

use std::f64::consts::TAU;

use winit::keyboard::KeyCode;

/// One arrow key press; 72 steps per turn.
pub const KEY_STEP: f64 = TAU / 72.0;

/// Rotation under a cursor at `x` physical pixels in a window `width` wide.
pub fn rotation_at(x: f64, width: u32) -> f64 {
    if width == 0 {
        return 0.0;
    }
    (x / f64::from(width)).clamp(0.0, 1.0) * TAU
}

/// Drag state for the rotation slider.
#[derive(Debug, Default)]
pub struct RotationControl {
    dragging: bool,
    cursor_x: Option<f64>,
}

impl RotationControl {
    /// Tracks the cursor; returns a new rotation while dragging.
    pub fn cursor_moved(&mut self, x: f64, width: u32) -> Option<f64> {
        self.cursor_x = Some(x);
        self.dragging.then(|| rotation_at(x, width))
    }

    pub fn cursor_left(&mut self) {
        self.cursor_x = None;
        self.dragging = false;
    }

    /// Left button press starts a drag and jumps to the cursor.
    pub fn button(&mut self, pressed: bool, width: u32) -> Option<f64> {
        self.dragging = pressed;
        if !pressed {
            return None;
        }
        self.cursor_x.map(|x| rotation_at(x, width))
    }

    /// Arrow keys step, Home/End jump to the ends of the range.
    pub fn key(&self, code: KeyCode, current: f64) -> Option<f64> {
        let step = match code {
            KeyCode::ArrowRight | KeyCode::ArrowUp => KEY_STEP,
            KeyCode::ArrowLeft | KeyCode::ArrowDown => -KEY_STEP,
            KeyCode::Home => return Some(0.0),
            KeyCode::End => return Some(TAU),
            _ => return None,
        };
        Some((current + step).clamp(0.0, TAU))
    }
}
