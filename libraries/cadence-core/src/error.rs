/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cadence
#[derive(Error, Debug)]
pub enum CoreError {
    /// No library entry with the given filename
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a track not found error
    pub fn track_not_found(filename: impl Into<String>) -> Self {
        Self::TrackNotFound(filename.into())
    }
}
