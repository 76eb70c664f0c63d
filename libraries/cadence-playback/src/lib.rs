//! Cadence - Playlist and Playback State
//!
//! Platform-agnostic playlist and playback management for Cadence.
//!
//! This crate provides:
//! - Ordered playlist with positional insert/remove (arena-backed linked list)
//! - Player store: `{tracks, current_index, playing}` with synchronous subscribers
//! - Device adapter that keeps an opaque playback device in sync with the store
//! - Repeat-one and random shuffle end-of-track policy
//! - Volume with mute memory, time readout formatting
//!
//! # Architecture
//!
//! `cadence-playback` renders no audio itself:
//! - No audio backend dependency
//! - No UI dependency
//! - No persistence; everything lives in memory
//!
//! The platform supplies a [`PlaybackDevice`] and forwards its events.
//!
//! # Example: Building a playlist
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{PlaylistManager, PlayerStore};
//!
//! let mut playlist = PlaylistManager::new();
//! playlist.add_end(Track::new("1", "Intro", "intro.mp3", "/music/intro.mp3"));
//! playlist.add_start(Track::new("0", "Overture", "overture.mp3", "/music/overture.mp3"));
//!
//! let mut store = PlayerStore::new();
//! store.set_tracks(playlist.to_vec());
//!
//! assert_eq!(store.state().current_index, Some(0));
//! assert!(!store.state().playing);
//!
//! store.next();
//! assert_eq!(store.state().current_track().unwrap().title, "Intro");
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{
//!     DeviceError, DeviceEvent, PlaybackDevice, PlayerSession,
//!     types::{InsertPosition, PlaybackConfig},
//! };
//!
//! // Implement PlaybackDevice for your platform
//! #[derive(Default)]
//! struct NullDevice {
//!     loaded: Option<String>,
//! }
//!
//! impl PlaybackDevice for NullDevice {
//!     fn load(&mut self, uri: &str) {
//!         self.loaded = Some(uri.to_string());
//!     }
//!     fn play(&mut self) -> Result<(), DeviceError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let mut session = PlayerSession::new(NullDevice::default(), &PlaybackConfig::default());
//! session.add(Track::new("a", "A", "a.mp3", "/music/a.mp3"), InsertPosition::End);
//! session.add(Track::new("b", "B", "b.mp3", "/music/b.mp3"), InsertPosition::End);
//! session.toggle_play();
//!
//! // Device reports the end of the first track
//! session.handle_device_event(DeviceEvent::Ended);
//! assert_eq!(session.state().current_index, Some(1));
//! assert_eq!(
//!     session.with_adapter(|a| a.loaded_src().map(str::to_string)),
//!     Some("/music/b.mp3".to_string())
//! );
//! ```

#![forbid(unsafe_code)]

mod adapter;
mod device;
mod error;
mod events;
mod list;
mod playlist;
mod session;
mod shuffle;
mod store;
pub mod types;
mod volume;

// Public exports
pub use adapter::{DeviceAdapter, EndOfTrackAction};
pub use device::PlaybackDevice;
pub use error::{DeviceError, PlaybackError, Result};
pub use events::{format_time, DeviceEvent, TimeDisplay};
pub use list::OrderedTrackList;
pub use playlist::PlaylistManager;
pub use session::PlayerSession;
pub use shuffle::random_index;
pub use store::{Listener, PlayerStore, SubscriptionId};
pub use types::{InsertPosition, PlaybackConfig, PlayerState, RepeatMode, ShuffleMode};
pub use volume::{Volume, VolumeIndicator, DEFAULT_VOLUME};
