//! Host-facing lifecycle of a GL surface.
//!
//! The host owns the window and the GL context and drives three callbacks:
//! - [`GlSurface::on_context_init`] once a context is current
//! - [`GlSurface::on_render_requested`] per frame, with the host framebuffer
//! - [`GlSurface::on_context_deinit`] before the context goes away
//!
//! All callbacks run on the thread that owns the context. Rotation may be fed
//! from elsewhere through a [`RotationHandle`].

mod cube;
mod rotation;

pub use cube::CubeSurface;
pub use rotation::{RotationHandle, RotationInput};

use crate::coords::ColorRgba;
use crate::device::GlDriver;
use crate::error::Result;
use crate::render::CameraConfig;

/// Lifecycle state of a surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceState {
    Uninitialized,
    Ready,
    Rendering,
    TornDown,
    /// A fatal error was returned; only teardown is accepted.
    Faulted,
}

impl SurfaceState {
    #[inline]
    pub fn can_render(self) -> bool {
        matches!(self, SurfaceState::Ready | SurfaceState::Rendering)
    }
}

/// Surface configuration.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub background: ColorRgba,
    pub camera: CameraConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            background: ColorRgba::DIM_GRAY,
            camera: CameraConfig::default(),
        }
    }
}

/// Callbacks a GL host invokes on a surface.
pub trait GlSurface<D: GlDriver> {
    /// Builds every GPU object; the context is current.
    fn on_context_init(&mut self, gl: &D) -> Result<()>;

    /// Releases every GPU object; the context is still current.
    fn on_context_deinit(&mut self, gl: &D);

    /// Draws one frame into `framebuffer` (`None` = default framebuffer).
    fn on_render_requested(
        &mut self,
        gl: &D,
        framebuffer: Option<D::Framebuffer>,
        width: u32,
        height: u32,
    ) -> Result<()>;
}
