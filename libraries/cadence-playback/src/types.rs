//! Core types for playback management

use cadence_core::Track;
use serde::{Deserialize, Serialize};

/// Where a track lands when added to the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Front of the playlist
    Start,

    /// Back of the playlist
    #[default]
    End,

    /// Explicit position, clamped into range
    Index(i64),
}

/// Authoritative "what is playing" state
///
/// Invariants, holding whenever an operation has returned:
/// - `current_index` is `None` exactly when `tracks` is empty
/// - otherwise `current_index < tracks.len()`
/// - `playing` implies `current_index` is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Snapshot of the playlist, in order
    pub tracks: Vec<Track>,

    /// Selected track, `None` when nothing is selected
    pub current_index: Option<usize>,

    /// Whether the transport should be running
    pub playing: bool,
}

impl PlayerState {
    /// Track at the current index
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|index| self.tracks.get(index))
    }

    /// Current index with `-1` for "none selected"
    pub fn current_index_or_unset(&self) -> i64 {
        self.current_index.map_or(-1, |index| index as i64)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether `index` addresses a track
    pub fn in_bounds(&self, index: i64) -> bool {
        index >= 0 && (index as usize) < self.tracks.len()
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Move on when a track ends
    #[default]
    Off,

    /// Restart the current track when it ends
    One,
}

impl RepeatMode {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Shuffle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Play in playlist order
    #[default]
    Off,

    /// Jump to a random track when one ends
    Random,
}

impl ShuffleMode {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Off => Self::Random,
            Self::Random => Self::Off,
        }
    }
}

/// Configuration for the device adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle mode (default: Off)
    pub shuffle: ShuffleMode,

    /// Fixed seed for shuffle picks, entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            repeat: RepeatMode::Off,
            shuffle: ShuffleMode::Off,
            shuffle_seed: None,
        }
    }
}
