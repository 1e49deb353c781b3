//! Cube shader program.
//!
//! The GLSL bodies are fixed; only the `#version` line varies with the driver.
//! [`ShaderDialect::negotiate`] picks it from an injected [`DriverCaps`] and
//! [`ShaderProgram::build`] compiles, links and resolves the transform uniforms.

mod program;
mod version;

pub use program::{
    compile, link, resolve_uniform, ShaderProgram, Uniforms, FRAGMENT_BODY, MODEL_UNIFORM,
    PROJECTION_UNIFORM, VERTEX_BODY, VIEW_UNIFORM,
};
pub use version::{parse_version, DriverCaps, PlatformFamily, ShaderDialect};
