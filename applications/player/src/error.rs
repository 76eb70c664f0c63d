/// Player application error types
use cadence_core::CoreError;
use cadence_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerAppError>;

#[derive(Debug, Error)]
pub enum PlayerAppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Library error: {0}")]
    Library(#[from] CoreError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlayerAppError {
    pub fn invalid_argument(command: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command,
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for PlayerAppError {
    fn from(err: config::ConfigError) -> Self {
        PlayerAppError::Config(err.to_string())
    }
}
