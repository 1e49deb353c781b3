/// Viewport size in physical pixels, as reported by the host for a render.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns `width / height`.
    ///
    /// A zero height is clamped to `f32::EPSILON` so a degenerate viewport yields a
    /// very wide (but finite) aspect instead of a division fault.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        let height = (self.height as f32).max(f32::EPSILON);
        self.width as f32 / height
    }
}
