//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading scenes or writing markers
#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene entry '{entry}': {source}")]
    InvalidEntry {
        entry: String,
        source: scenemark_core::Error,
    },

    #[error("Invalid scene: {message}")]
    InvalidScene { message: String },
}

/// Result type alias for I/O operations
pub type Result<T> = std::result::Result<T, IoError>;
