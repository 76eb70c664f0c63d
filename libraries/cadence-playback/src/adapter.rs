//! Device adapter - mirrors the player store onto a playback device
//!
//! The adapter owns no playlist state. On every store notification it makes
//! the device match `tracks[current_index]` and `playing`:
//! 1. Nothing selected - pause and clear the time readout
//! 2. Selected track's source differs from what is loaded - load it
//! 3. Play if `playing`, pause otherwise
//!
//! Device failures stop here. A refused `play()` is logged and kept as
//! [`last_error`](DeviceAdapter::last_error); the store's `playing` flag is
//! left alone so the next user gesture can retry.
//!
//! End-of-track policy (repeat / shuffle / advance) also lives here, outside
//! the state machine. The adapter decides, the caller applies the decision
//! to the store.

use crate::{
    device::PlaybackDevice,
    error::DeviceError,
    events::{DeviceEvent, TimeDisplay},
    shuffle::random_index,
    store::PlayerStore,
    types::{PlaybackConfig, PlayerState, RepeatMode, ShuffleMode},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

/// What should happen to the store after a track ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTrackAction {
    /// Repeat: the device already restarted the same track
    Restart,

    /// Shuffle: select this index
    Jump(usize),

    /// Move to the next track (no-op at the end of the playlist)
    Advance,
}

impl EndOfTrackAction {
    /// Apply the decision to the store
    pub fn apply(self, store: &mut PlayerStore) {
        match self {
            Self::Restart => {}
            Self::Jump(index) => store.set_current(index as i64),
            Self::Advance => store.next(),
        }
    }
}

/// Bridges [`PlayerStore`] state to a [`PlaybackDevice`]
#[derive(Debug)]
pub struct DeviceAdapter<D: PlaybackDevice> {
    device: D,

    /// Source currently loaded on the device
    loaded_src: Option<String>,

    /// Index the last sync saw as current
    current_index: Option<usize>,

    time: TimeDisplay,
    volume: Volume,
    repeat: RepeatMode,
    shuffle: ShuffleMode,

    /// Last failure reported by the device, cleared on success
    last_error: Option<DeviceError>,

    rng: StdRng,
}

impl<D: PlaybackDevice> DeviceAdapter<D> {
    /// Wrap a device, pushing the configured volume to it
    pub fn new(device: D, config: &PlaybackConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut adapter = Self {
            device,
            loaded_src: None,
            current_index: None,
            time: TimeDisplay::default(),
            volume,
            repeat: config.repeat,
            shuffle: config.shuffle,
            last_error: None,
            rng,
        };
        adapter.push_volume();
        adapter
    }

    /// Make the device match `state`
    pub fn sync(&mut self, state: &PlayerState) {
        self.current_index = state.current_index;

        let Some(track) = state.current_track() else {
            trace!("nothing selected, pausing device");
            self.device.pause();
            self.time.clear();
            return;
        };

        if self.loaded_src.as_deref() != Some(track.src.as_str()) {
            debug!(src = %track.src, title = %track.title, "loading source");
            self.device.load(&track.src);
            self.loaded_src = Some(track.src.clone());
            self.time.clear();
        }

        if state.playing {
            self.start_playback();
        } else {
            self.device.pause();
        }
    }

    /// Try to start the device again after a refused start
    ///
    /// Does nothing unless the store wants playback.
    pub fn retry(&mut self, state: &PlayerState) -> Result<(), DeviceError> {
        if !state.playing || state.current_track().is_none() {
            return Ok(());
        }

        match self.device.play() {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "retry of playback failed");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Handle a device event
    ///
    /// Time updates refresh the readout. `Ended` returns the action the
    /// caller should apply to the store, or `None` for an empty playlist.
    pub fn handle_event(
        &mut self,
        event: DeviceEvent,
        state: &PlayerState,
    ) -> Option<EndOfTrackAction> {
        match event {
            DeviceEvent::TimeUpdate {
                current_secs,
                duration_secs,
            } => {
                self.time.update(current_secs, duration_secs);
                None
            }
            DeviceEvent::Ended => self.on_ended(state),
        }
    }

    fn on_ended(&mut self, state: &PlayerState) -> Option<EndOfTrackAction> {
        if state.is_empty() {
            return None;
        }

        if self.repeat == RepeatMode::One {
            debug!("track ended, repeating");
            self.restart_current();
            return Some(EndOfTrackAction::Restart);
        }

        if self.shuffle == ShuffleMode::Random {
            let index = random_index(&mut self.rng, state.len())?;
            debug!(index, "track ended, shuffling");
            if Some(index) == state.current_index {
                // Same track again: selecting it will not reload the source
                self.device.seek(0.0);
                self.time.current_secs = 0.0;
            }
            return Some(EndOfTrackAction::Jump(index));
        }

        debug!("track ended, advancing");
        Some(EndOfTrackAction::Advance)
    }

    fn restart_current(&mut self) {
        self.device.seek(0.0);
        self.time.current_secs = 0.0;
        self.start_playback();
    }

    fn start_playback(&mut self) {
        match self.device.play() {
            Ok(()) => self.last_error = None,
            Err(err) => {
                warn!(error = %err, "device refused to start playback");
                self.last_error = Some(err);
            }
        }
    }

    /// Seek within the loaded track
    ///
    /// Ignored when nothing is selected or `seconds` is not finite.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() || self.current_index.is_none() || self.loaded_src.is_none() {
            trace!(seconds, "seek ignored");
            return;
        }

        let seconds = seconds.max(0.0);
        self.device.seek(seconds);
        let max = self.time.progress_max();
        self.time.current_secs = if max > 0.0 { seconds.min(max) } else { seconds };
    }

    /// Set the output level; raising it while muted unmutes
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.push_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.push_volume();
    }

    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.toggle();
        debug!(repeat = ?self.repeat, "repeat mode changed");
        self.repeat
    }

    pub fn toggle_shuffle(&mut self) -> ShuffleMode {
        self.shuffle = self.shuffle.toggle();
        debug!(shuffle = ?self.shuffle, "shuffle mode changed");
        self.shuffle
    }

    fn push_volume(&mut self) {
        self.device.set_volume(self.volume.level());
        self.device.set_muted(self.volume.is_muted());
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn shuffle(&self) -> ShuffleMode {
        self.shuffle
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn time(&self) -> &TimeDisplay {
        &self.time
    }

    pub fn loaded_src(&self) -> Option<&str> {
        self.loaded_src.as_deref()
    }

    pub fn last_error(&self) -> Option<&DeviceError> {
        self.last_error.as_ref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
