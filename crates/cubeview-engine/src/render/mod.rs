//! Per-frame GPU work for the cube.
//!
//! - [`CameraConfig`] turns a rotation and viewport into frame matrices.
//! - [`GpuResources`] owns the buffers, vertex array and program and issues the draw.
//!
//! Convention:
//! - world space is right-handed, +Y up, cube centered at the origin
//! - projection targets GL clip space (z in [-1, 1])

mod camera;
mod resources;

pub use camera::{CameraConfig, FrameTransforms};
pub use resources::GpuResources;
