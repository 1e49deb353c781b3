//! Error type returned by the surface lifecycle.
//!
//! Every variant except [`RenderError::InvalidState`] means the GL context can
//! no longer be trusted; the surface stops rendering and the host decides
//! whether to rebuild the context or report the failure.

use std::panic::Location;

use thiserror::Error;

use crate::device::{GlErrorCode, ShaderStage};
use crate::mesh::MeshError;
use crate::surface::SurfaceState;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The driver rejected a shader; `log` is the compiler output.
    #[error("{stage} shader compile error: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// The driver failed to link the program; `log` is the linker output.
    #[error("shader program link error: {log}")]
    Link { log: String },

    /// `glGetError` reported a failure after `op`.
    #[error("GL task failed: {op}, error code {code} at {location}")]
    Driver {
        op: &'static str,
        code: GlErrorCode,
        location: &'static Location<'static>,
    },

    /// The driver refused to create an object.
    #[error("failed to create {what}: {reason}")]
    Allocation { what: &'static str, reason: String },

    /// The mesh handed to the resource manager is malformed.
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    /// A lifecycle callback arrived in a state that does not accept it.
    #[error("{op} is not valid while the surface is {state:?}")]
    InvalidState { op: &'static str, state: SurfaceState },
}

impl RenderError {
    /// Whether the error poisons the GL context.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::InvalidState { .. })
    }
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
