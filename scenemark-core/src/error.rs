//! Error types for scenemark

use thiserror::Error;

/// Main error type for scenemark operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid shape ({kind}): {reason}")]
    InvalidShape { kind: &'static str, reason: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid pose: {0}")]
    InvalidPose(String),

    #[error("Duplicate geometry name '{name}' in source '{source_name}'")]
    DuplicateGeometry { source_name: String, name: String },

    #[error("Duplicate geometry id: {0}")]
    DuplicateId(u64),

    #[error("Unknown geometry id: {0}")]
    UnknownGeometry(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for scenemark operations
pub type Result<T> = std::result::Result<T, Error>;
