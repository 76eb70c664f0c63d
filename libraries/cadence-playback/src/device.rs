//! Playback device trait
//!
//! Abstracts the thing that actually renders audio (an audio element, a
//! native output stream, a simulator in tests). The device owns no playlist
//! state; it is told what to load and whether to run.

use crate::error::DeviceError;

/// Opaque audio playback device
///
/// Implementors report progress back through
/// [`DeviceEvent`](crate::DeviceEvent)s delivered by the host to the adapter.
pub trait PlaybackDevice {
    /// Load a new source, replacing whatever was loaded
    fn load(&mut self, uri: &str);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started (or start was accepted)
    /// * `Err(_)` - Start refused, e.g. blocked by an autoplay policy
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Move to `seconds` from the start of the loaded source
    fn seek(&mut self, seconds: f64);

    /// Output volume in `0.0..=1.0`
    fn set_volume(&mut self, volume: f32);

    /// Mute without losing the volume setting
    fn set_muted(&mut self, muted: bool);
}

/// Device call log for tests
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
    Muted(bool),
}

/// Device that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
    pub reject_play: bool,
}

#[cfg(test)]
impl RecordingDevice {
    pub fn rejecting() -> Self {
        Self {
            calls: Vec::new(),
            reject_play: true,
        }
    }

    pub fn take_calls(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }
}

#[cfg(test)]
impl PlaybackDevice for RecordingDevice {
    fn load(&mut self, uri: &str) {
        self.calls.push(DeviceCall::Load(uri.to_string()));
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        self.calls.push(DeviceCall::Play);
        if self.reject_play {
            return Err(DeviceError::PlaybackBlocked("user gesture required".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(DeviceCall::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(DeviceCall::Seek(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(DeviceCall::Volume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(DeviceCall::Muted(muted));
    }
}
