//! Volume control
//!
//! Linear level in `0.0..=1.0`, handed straight to the device, plus a mute
//! flag that remembers the level it was muted at.

use serde::{Deserialize, Serialize};

/// Default level when nothing is configured
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Coarse loudness indicator for the volume button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeIndicator {
    /// Muted or at zero
    Off,
    /// Below half
    Low,
    /// Half or more
    High,
}

/// Volume controller with mute memory
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Level saved when muting
    previous_level: f32,
}

impl Volume {
    /// Create new volume controller, clamping `level` into range
    pub fn new(level: f32) -> Self {
        let level = clamp_level(level);
        Self {
            level,
            muted: false,
            previous_level: level,
        }
    }

    /// Set volume level (0.0-1.0)
    ///
    /// Raising the level above zero while muted unmutes.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
        if self.muted && self.level > 0.0 {
            self.muted = false;
        }
    }

    /// Current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.previous_level = self.level;
        self.muted = true;
    }

    /// Unmute audio
    ///
    /// If the level was dragged to zero while muted, the level saved at mute
    /// time comes back.
    pub fn unmute(&mut self) {
        self.muted = false;
        if self.level == 0.0 && self.previous_level > 0.0 {
            self.level = self.previous_level;
        }
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain actually applied: 0.0 when muted
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    pub fn indicator(&self) -> VolumeIndicator {
        if self.muted || self.level == 0.0 {
            VolumeIndicator::Off
        } else if self.level < 0.5 {
            VolumeIndicator::Low
        } else {
            VolumeIndicator::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
