//! Error types for synapsis_io.

use thiserror::Error;

/// Main error type for export and persistence operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Compression errors
    #[error("Compression error: {0}")]
    Compression(String),

    /// Validation errors (malformed or empty input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The save file was written by a newer version of this crate
    #[error("Save file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Result type alias for synapsis_io operations.
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    #[must_use]
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Self::Compression(msg.into())
    }

    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
}
