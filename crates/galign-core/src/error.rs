//! Error types for the galign engine.
//!
//! These cover failures that make an operation itself impossible, such as an
//! unusable root or an unwritable sidecar. During a tree pass, per-file
//! failures never propagate as `Err`; the orchestrator records them in its
//! report so one bad file cannot abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the galign library.
#[derive(Debug, Error)]
pub enum GalignError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for galign operations.
pub type Result<T> = std::result::Result<T, GalignError>;

// Conversion implementations for common error types

impl From<std::io::Error> for GalignError {
    fn from(err: std::io::Error) -> Self {
        GalignError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for GalignError {
    fn from(err: serde_json::Error) -> Self {
        GalignError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl GalignError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GalignError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
