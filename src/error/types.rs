//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for singularity-gen operations
///
/// Every variant is fatal for a run. The variant decides the exit code.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GenError {
    /// Override Error - a `--var` argument was not in `KEY=VALUE` form
    #[error("Override error: {message}")]
    Override { message: String },

    /// Read Error - the configuration file is missing or unreadable
    #[error("Read error: {message}")]
    Read { message: String },

    /// Parse Error - the substituted YAML is malformed or mistyped
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Render Error - a document template could not be filled
    #[error("Render error: {message}")]
    Render { message: String },

    /// Validation Error - a rendered document is not well-formed JSON
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Write Error - an output file could not be written
    #[error("Write error: {message}")]
    Write { message: String },
}

impl GenError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Override { .. } => 1,
            Self::Read { .. } => 2,
            Self::Parse { .. } => 3,
            Self::Render { .. } => 4,
            Self::Validation { .. } => 5,
            Self::Write { .. } => 6,
        }
    }

    /// Create an override error
    #[inline]
    pub fn override_format<S: Into<String>>(message: S) -> Self {
        Self::Override {
            message: message.into(),
        }
    }

    /// Create a read error
    #[inline]
    pub fn read<S: Into<String>>(message: S) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Create a parse error
    #[inline]
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a render error
    #[inline]
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a validation error
    #[inline]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a write error
    #[inline]
    pub fn write<S: Into<String>>(message: S) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}
