//! Error types for structural editing operations

use std::path::PathBuf;
use thiserror::Error;

use crate::cst::SyntaxKind;

/// Main error type for editing operations
///
/// Ordering problems never surface here: elements without a rank are placed
/// last. Errors are reserved for structural misuse, which is detected before
/// any tree is rebuilt.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// A required input is missing or does not belong where it was passed
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// The node kind does not support the requested edit
    #[error("Cannot {operation} on a node of kind {kind:?}")]
    UnsupportedNode {
        kind: SyntaxKind,
        operation: &'static str,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Unsupported,
    Config,
    Io,
    Internal,
}

impl TrellisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrellisError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            TrellisError::UnsupportedNode { .. } => ErrorKind::Unsupported,
            TrellisError::ConfigError { .. } => ErrorKind::Config,
            TrellisError::IoError { .. } => ErrorKind::Io,
            TrellisError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Whether a batch of edits can skip this one and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument | ErrorKind::Unsupported
        )
    }

    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    pub fn unsupported(kind: SyntaxKind, operation: &'static str) -> Self {
        Self::UnsupportedNode { kind, operation }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
