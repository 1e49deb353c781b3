use std::fmt;
use std::panic::Location;

use crate::error::RenderError;

use super::GlDriver;

/// Decoded `glGetError` value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GlErrorCode {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    /// A code outside the core set (vendor or extension specific).
    Unknown(u32),
}

impl GlErrorCode {
    pub const fn from_raw(code: u32) -> Self {
        match code {
            0x0500 => Self::InvalidEnum,
            0x0501 => Self::InvalidValue,
            0x0502 => Self::InvalidOperation,
            0x0503 => Self::StackOverflow,
            0x0504 => Self::StackUnderflow,
            0x0505 => Self::OutOfMemory,
            0x0506 => Self::InvalidFramebufferOperation,
            other => Self::Unknown(other),
        }
    }

    pub const fn raw(self) -> u32 {
        match self {
            Self::InvalidEnum => 0x0500,
            Self::InvalidValue => 0x0501,
            Self::InvalidOperation => 0x0502,
            Self::StackOverflow => 0x0503,
            Self::StackUnderflow => 0x0504,
            Self::OutOfMemory => 0x0505,
            Self::InvalidFramebufferOperation => 0x0506,
            Self::Unknown(code) => code,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidEnum => "GL_INVALID_ENUM",
            Self::InvalidValue => "GL_INVALID_VALUE",
            Self::InvalidOperation => "GL_INVALID_OPERATION",
            Self::StackOverflow => "GL_STACK_OVERFLOW",
            Self::StackUnderflow => "GL_STACK_UNDERFLOW",
            Self::OutOfMemory => "GL_OUT_OF_MEMORY",
            Self::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            Self::Unknown(_) => "unrecognized error",
        }
    }
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X} {}", self.raw(), self.label())
    }
}

/// Queries the driver error flag after `op`.
///
/// Any error is fatal: GPU state after a failed call is not trusted, so the
/// caller is expected to abandon the current init or frame. The returned error
/// records the caller's source location.
#[track_caller]
pub fn check<D: GlDriver + ?Sized>(gl: &D, op: &'static str) -> Result<(), RenderError> {
    match gl.get_error() {
        0 => Ok(()),
        raw => Err(RenderError::Driver {
            op,
            code: GlErrorCode::from_raw(raw),
            location: Location::caller(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fake::FakeDriver;

    #[test]
    fn known_codes_round_trip() {
        for raw in 0x0500..=0x0506 {
            let code = GlErrorCode::from_raw(raw);
            assert!(!matches!(code, GlErrorCode::Unknown(_)), "0x{raw:04X}");
            assert_eq!(code.raw(), raw);
        }
    }

    #[test]
    fn unknown_code_keeps_value() {
        let code = GlErrorCode::from_raw(0x8031);
        assert_eq!(code, GlErrorCode::Unknown(0x8031));
        assert_eq!(code.to_string(), "0x8031 unrecognized error");
    }

    #[test]
    fn labels_match_gl_names() {
        assert_eq!(GlErrorCode::InvalidOperation.label(), "GL_INVALID_OPERATION");
        assert_eq!(GlErrorCode::OutOfMemory.to_string(), "0x0505 GL_OUT_OF_MEMORY");
    }

    #[test]
    fn check_passes_without_error() {
        let gl = FakeDriver::new();
        assert!(check(&gl, "noop").is_ok());
    }

    #[test]
    fn check_reports_op_code_and_call_site() {
        let gl = FakeDriver::new();
        gl.raise_error(0x0501);
        let line = line!() + 1;
        let err = check(&gl, "upload vertices").unwrap_err();

        let RenderError::Driver { op, code, location } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*op, "upload vertices");
        assert_eq!(*code, GlErrorCode::InvalidValue);
        assert_eq!(location.line(), line);
        assert!(location.file().ends_with("error.rs"));

        let msg = err.to_string();
        assert!(msg.contains("upload vertices"), "{msg}");
        assert!(msg.contains("0x0501"), "{msg}");
        assert!(msg.contains("GL_INVALID_VALUE"), "{msg}");
        assert!(msg.contains("error.rs"), "{msg}");
    }

    #[test]
    fn error_flag_is_consumed_by_check() {
        let gl = FakeDriver::new();
        gl.raise_error(0x0502);
        assert!(check(&gl, "first").is_err());
        assert!(check(&gl, "second").is_ok());
    }
}
