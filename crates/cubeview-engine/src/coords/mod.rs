//! Color and viewport value types shared by the surface and the host.
//!
//! Both are plain `Copy` values; nothing in here touches the driver.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
