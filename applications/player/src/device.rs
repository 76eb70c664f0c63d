//! Simulated playback device
//!
//! Stands in for an audio output. Keeps a clock that only moves when the
//! host calls [`SimulatedDevice::tick`], which returns the events a real
//! device would have emitted over that span.

use cadence_playback::{DeviceError, DeviceEvent, PlaybackDevice};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Duration assumed for sources with no known length
pub const DEFAULT_TRACK_SECS: f64 = 180.0;

#[derive(Debug, Default)]
pub struct SimulatedDevice {
    loaded: Option<String>,
    running: bool,
    position: f64,
    duration: f64,
    volume: f32,
    muted: bool,

    /// Known source lengths, by URI
    durations: HashMap<String, f64>,

    /// Refuse `play()`, like a browser blocking autoplay
    pub reject_play: bool,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that refuses to start until `reject_play` is cleared
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::default()
        }
    }

    /// Register the length of a source
    pub fn set_duration(&mut self, uri: impl Into<String>, secs: f64) {
        self.durations.insert(uri.into(), secs);
    }

    /// Advance the clock by `secs`
    ///
    /// Returns a time update, followed by `Ended` if the source ran out.
    /// Nothing happens while paused or unloaded.
    pub fn tick(&mut self, secs: f64) -> Vec<DeviceEvent> {
        if !self.running || self.loaded.is_none() || !secs.is_finite() || secs <= 0.0 {
            return Vec::new();
        }

        self.position = (self.position + secs).min(self.duration);
        let mut events = vec![DeviceEvent::TimeUpdate {
            current_secs: self.position,
            duration_secs: self.duration,
        }];

        if self.position >= self.duration {
            trace!(src = ?self.loaded, "simulated source ended");
            self.running = false;
            events.push(DeviceEvent::Ended);
        }
        events
    }

    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl PlaybackDevice for SimulatedDevice {
    fn load(&mut self, uri: &str) {
        self.duration = self
            .durations
            .get(uri)
            .copied()
            .unwrap_or(DEFAULT_TRACK_SECS);
        self.loaded = Some(uri.to_string());
        self.position = 0.0;
        self.running = false;
        debug!(uri, duration = self.duration, "simulated device loaded source");
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if self.reject_play {
            return Err(DeviceError::PlaybackBlocked(
                "simulated device is rejecting playback".to_string(),
            ));
        }
        if self.loaded.is_none() {
            return Err(DeviceError::Other("nothing loaded".to_string()));
        }
        if self.position >= self.duration {
            // Playing an ended source starts it over
            self.position = 0.0;
        }
        self.running = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_while_paused_emits_nothing() {
        let mut device = SimulatedDevice::new();
        device.load("/a.mp3");
        assert!(device.tick(5.0).is_empty());
    }

    #[test]
    fn tick_runs_to_end() {
        let mut device = SimulatedDevice::new();
        device.set_duration("/a.mp3", 10.0);
        device.load("/a.mp3");
        device.play().unwrap();

        assert_eq!(
            device.tick(4.0),
            vec![DeviceEvent::TimeUpdate {
                current_secs: 4.0,
                duration_secs: 10.0
            }]
        );

        let events = device.tick(30.0);
        assert_eq!(events.last(), Some(&DeviceEvent::Ended));
        assert_eq!(device.position(), 10.0);
        assert!(!device.is_running());
    }

    #[test]
    fn play_after_end_starts_over() {
        let mut device = SimulatedDevice::new();
        device.set_duration("/a.mp3", 10.0);
        device.load("/a.mp3");
        device.play().unwrap();
        device.tick(12.0);
        assert!(!device.is_running());

        device.play().unwrap();
        assert_eq!(device.position(), 0.0);
        assert!(device.is_running());
    }

    #[test]
    fn unknown_source_uses_default_length() {
        let mut device = SimulatedDevice::new();
        device.load("/unknown.mp3");
        assert_eq!(device.duration(), DEFAULT_TRACK_SECS);
    }

    #[test]
    fn rejecting_device_refuses_play() {
        let mut device = SimulatedDevice::rejecting();
        device.load("/a.mp3");
        assert!(matches!(device.play(), Err(DeviceError::PlaybackBlocked(_))));
        assert!(!device.is_running());
    }

    #[test]
    fn seek_clamps_to_source() {
        let mut device = SimulatedDevice::new();
        device.set_duration("/a.mp3", 20.0);
        device.load("/a.mp3");
        device.seek(50.0);
        assert_eq!(device.position(), 20.0);
        device.seek(-1.0);
        assert_eq!(device.position(), 0.0);
    }
}
