//! Playback device events
//!
//! Events flow from the device back into the player:
//! - Time updates (periodic, and once metadata is known)
//! - End of track

use serde::{Deserialize, Serialize};

/// Events emitted by a playback device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Playback position changed
    TimeUpdate {
        /// Current position in seconds
        current_secs: f64,
        /// Total duration in seconds (may be NaN or 0 while unknown)
        duration_secs: f64,
    },

    /// Track finished playing naturally (reached end)
    Ended,
}

/// Position readout for the transport bar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeDisplay {
    /// Current position in seconds
    pub current_secs: f64,
    /// Duration in seconds
    pub duration_secs: f64,
}

impl TimeDisplay {
    /// Record a time update, treating non-finite values as 0
    pub fn update(&mut self, current_secs: f64, duration_secs: f64) {
        self.current_secs = finite_or_zero(current_secs);
        self.duration_secs = finite_or_zero(duration_secs);
    }

    /// Reset to `0:00 / 0:00`
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Upper bound for a seek slider
    pub fn progress_max(&self) -> f64 {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            self.duration_secs
        } else {
            0.0
        }
    }

    /// Slider position, never past the end
    pub fn progress(&self) -> f64 {
        self.current_secs.min(self.progress_max())
    }

    /// `m:ss / m:ss`
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.current_secs),
            format_time(self.duration_secs)
        )
    }
}

/// Render seconds as `m:ss`
///
/// Negative or non-finite input renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
