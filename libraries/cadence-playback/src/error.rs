//! Error types for playback management
//!
//! The playlist and the player store never fail; out-of-range requests are
//! ignored or answered with `None`. Errors only exist at the edges: the
//! playback device and the library lookups.

use cadence_core::CoreError;
use thiserror::Error;

/// Failure reported by a playback device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Start of playback refused, e.g. by an autoplay policy
    #[error("Playback blocked: {0}")]
    PlaybackBlocked(String),

    /// Source could not be loaded
    #[error("Failed to load {uri}: {reason}")]
    Load { uri: String, reason: String },

    /// Anything else the device reports
    #[error("Device error: {0}")]
    Other(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playback device error
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Library / core error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
