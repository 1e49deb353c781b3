//! Graphics driver boundary.
//!
//! This module is responsible for:
//! - the [`GlDriver`] trait, the only path through which the engine talks to GL
//! - the `glow`-backed implementation used by real hosts
//! - [`Slot`], the owned-or-empty state of a native handle
//! - translating `glGetError` codes into fatal, located errors

mod driver;
mod error;
mod native;
mod slot;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::{BufferTarget, GlDriver, ShaderStage};
pub use error::{check, GlErrorCode};
pub use native::GlowDriver;
pub use slot::Slot;
