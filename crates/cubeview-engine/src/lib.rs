//! Cubeview engine crate.
//!
//! Renders an orbiting, vertex-colored cube into a host-owned OpenGL context.
//! The host (window toolkit, GL loader) stays outside this crate and drives a
//! [`surface::GlSurface`] through its init / render / deinit callbacks.

pub mod coords;
pub mod device;
pub mod error;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod surface;

pub use error::{RenderError, Result};
