//! Player session - wires playlist, store and device together
//!
//! Data flow:
//! ```text
//! PlaylistManager ──to_vec()──▶ PlayerStore::set_tracks ──notify──▶ DeviceAdapter
//!                                        ▲                              │
//!                                        └──── EndOfTrackAction ◀── DeviceEvent
//! ```
//!
//! The session is constructed explicitly and handed to whoever drives the
//! player; there is no global instance. The adapter is a store subscriber,
//! so it is shared through `Rc<RefCell<_>>`. The session never holds an
//! adapter borrow while mutating the store, which keeps notifications from
//! re-entering a live borrow.

use crate::{
    adapter::DeviceAdapter,
    device::PlaybackDevice,
    error::Result,
    events::DeviceEvent,
    playlist::PlaylistManager,
    store::{PlayerStore, SubscriptionId},
    types::{InsertPosition, PlaybackConfig, PlayerState, RepeatMode, ShuffleMode},
};
use cadence_core::{CoreError, Library, Track};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// A running player: playlist, state machine and device adapter
pub struct PlayerSession<D: PlaybackDevice + 'static> {
    playlist: PlaylistManager,
    store: PlayerStore,
    adapter: Rc<RefCell<DeviceAdapter<D>>>,
    adapter_subscription: SubscriptionId,
}

impl<D: PlaybackDevice + 'static> PlayerSession<D> {
    /// Start a session on `device`
    pub fn new(device: D, config: &PlaybackConfig) -> Self {
        let adapter = Rc::new(RefCell::new(DeviceAdapter::new(device, config)));
        let mut store = PlayerStore::new();

        let sink = Rc::clone(&adapter);
        let adapter_subscription = store.subscribe(move |state| sink.borrow_mut().sync(state));

        info!(
            volume = config.volume,
            repeat = ?config.repeat,
            shuffle = ?config.shuffle,
            "player session started"
        );

        Self {
            playlist: PlaylistManager::new(),
            store,
            adapter,
            adapter_subscription,
        }
    }

    /// Add a track to the playlist and publish the new order
    pub fn add(&mut self, track: Track, position: InsertPosition) {
        debug!(filename = %track.filename, ?position, "adding to playlist");
        self.playlist.add(track, position);
        self.publish();
    }

    /// Add a library track by filename
    pub fn add_from_library(
        &mut self,
        library: &Library,
        filename: &str,
        position: InsertPosition,
    ) -> Result<()> {
        let track = library
            .get(filename)
            .cloned()
            .ok_or_else(|| CoreError::track_not_found(filename))?;
        self.add(track, position);
        Ok(())
    }

    /// Remove a playlist entry
    ///
    /// An invalid index changes nothing and notifies nobody.
    pub fn remove(&mut self, index: i64) -> Option<Track> {
        let removed = self.playlist.remove_at(index)?;
        debug!(index, filename = %removed.filename, "removed from playlist");
        self.publish();
        Some(removed)
    }

    fn publish(&mut self) {
        self.store.set_tracks(self.playlist.to_vec());
    }

    pub fn toggle_play(&mut self) {
        self.store.toggle_play();
    }

    pub fn toggle_play_index(&mut self, index: i64) {
        self.store.toggle_play_index(index);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.store.set_playing(playing);
    }

    /// Select a track without changing play/pause
    pub fn select(&mut self, index: i64) {
        self.store.set_current(index);
    }

    pub fn next(&mut self) {
        self.store.next();
    }

    pub fn prev(&mut self) {
        self.store.prev();
    }

    /// Feed a device event through the end-of-track policy
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        let action = self
            .adapter
            .borrow_mut()
            .handle_event(event, self.store.state());

        if let Some(action) = action {
            debug!(?action, "applying end-of-track action");
            action.apply(&mut self.store);
        }
    }

    /// Ask the device to start again after it refused
    pub fn retry_playback(&mut self) -> Result<()> {
        self.adapter.borrow_mut().retry(self.store.state())?;
        Ok(())
    }

    pub fn seek(&mut self, seconds: f64) {
        self.adapter.borrow_mut().seek(seconds);
    }

    pub fn set_volume(&mut self, level: f32) {
        self.adapter.borrow_mut().set_volume(level);
    }

    pub fn toggle_mute(&mut self) {
        self.adapter.borrow_mut().toggle_mute();
    }

    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.adapter.borrow_mut().toggle_repeat()
    }

    pub fn toggle_shuffle(&mut self) -> ShuffleMode {
        self.adapter.borrow_mut().toggle_shuffle()
    }

    /// Register a UI listener (called immediately, then on every change)
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PlayerState) + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Remove a UI listener. The device adapter cannot be unsubscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if id == self.adapter_subscription {
            return false;
        }
        self.store.unsubscribe(id)
    }

    pub fn state(&self) -> &PlayerState {
        self.store.state()
    }

    pub fn playlist(&self) -> &PlaylistManager {
        &self.playlist
    }

    /// Read access to the adapter
    pub fn with_adapter<R>(&self, f: impl FnOnce(&DeviceAdapter<D>) -> R) -> R {
        f(&self.adapter.borrow())
    }

    /// Mutable access to the device, e.g. to poll a simulated clock
    pub fn with_device_mut<R>(&mut self, f: impl FnOnce(&mut D) -> R) -> R {
        f(self.adapter.borrow_mut().device_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::EndOfTrackAction;
    use crate::device::{DeviceCall, RecordingDevice};
    use crate::error::PlaybackError;

    fn track(name: &str) -> Track {
        Track::new(name, name.to_uppercase(), format!("{name}.mp3"), format!("/media/{name}.mp3"))
    }

    fn session() -> PlayerSession<RecordingDevice> {
        let config = PlaybackConfig {
            shuffle_seed: Some(11),
            ..PlaybackConfig::default()
        };
        let mut session = PlayerSession::new(RecordingDevice::default(), &config);
        session.with_device_mut(|d| d.take_calls());
        session
    }

    #[test]
    fn construction_syncs_device_once() {
        let session = PlayerSession::new(RecordingDevice::default(), &PlaybackConfig::default());
        session.with_adapter(|a| {
            assert_eq!(
                a.device().calls,
                vec![
                    DeviceCall::Volume(0.7),
                    DeviceCall::Muted(false),
                    DeviceCall::Pause
                ]
            );
        });
    }

    #[test]
    fn adding_first_track_loads_but_does_not_play() {
        let mut session = session();
        session.add(track("a"), InsertPosition::End);

        assert_eq!(session.state().current_index, Some(0));
        assert!(!session.state().playing);
        assert_eq!(
            session.with_device_mut(|d| d.take_calls()),
            vec![DeviceCall::Load("/media/a.mp3".into()), DeviceCall::Pause]
        );
    }

    #[test]
    fn add_positions_flow_into_store() {
        let mut session = session();
        session.add(track("b"), InsertPosition::End);
        session.add(track("a"), InsertPosition::Start);
        session.add(track("c"), InsertPosition::Index(99));

        let names: Vec<_> = session.state().tracks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(session.playlist().size(), 3);
    }

    #[test]
    fn add_from_library_reports_missing() {
        let library = Library::from_tracks([track("a")]);
        let mut session = session();

        assert!(session
            .add_from_library(&library, "a.mp3", InsertPosition::End)
            .is_ok());
        let err = session
            .add_from_library(&library, "zzz.mp3", InsertPosition::End)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Core(CoreError::TrackNotFound(_))));
        assert_eq!(session.playlist().size(), 1);
    }

    #[test]
    fn removing_last_track_empties_store() {
        let mut session = session();
        session.add(track("a"), InsertPosition::End);
        session.toggle_play();

        assert!(session.remove(0).is_some());
        assert_eq!(session.state().current_index, None);
        assert!(!session.state().playing);
        assert!(session.remove(0).is_none());
    }

    #[test]
    fn ended_advances_through_store() {
        let mut session = session();
        for name in ["a", "b"] {
            session.add(track(name), InsertPosition::End);
        }
        session.toggle_play();
        session.with_device_mut(|d| d.take_calls());

        session.handle_device_event(DeviceEvent::Ended);
        assert_eq!(session.state().current_index, Some(1));
        assert_eq!(
            session.with_device_mut(|d| d.take_calls()),
            vec![DeviceCall::Load("/media/b.mp3".into()), DeviceCall::Play]
        );

        // Last track: nothing left to advance to
        session.handle_device_event(DeviceEvent::Ended);
        assert_eq!(session.state().current_index, Some(1));
    }

    #[test]
    fn ended_with_shuffle_stays_in_bounds() {
        let mut session = session();
        for name in ["a", "b", "c"] {
            session.add(track(name), InsertPosition::End);
        }
        assert_eq!(session.toggle_shuffle(), ShuffleMode::Random);
        session.toggle_play();

        for _ in 0..20 {
            session.handle_device_event(DeviceEvent::Ended);
            let index = session.state().current_index.unwrap();
            assert!(index < 3);
            assert!(session.state().playing);
        }
    }

    #[test]
    fn adapter_subscription_is_protected() {
        let mut session = session();
        assert!(!session.unsubscribe(session.adapter_subscription));

        let id = session.subscribe(|_| {});
        assert!(session.unsubscribe(id));
    }

    #[test]
    fn retry_surfaces_device_error() {
        let mut session = PlayerSession::new(RecordingDevice::rejecting(), &PlaybackConfig::default());
        session.add(track("a"), InsertPosition::End);
        session.toggle_play();

        // Store keeps wanting playback even though the device refused
        assert!(session.state().playing);
        assert!(matches!(
            session.retry_playback(),
            Err(PlaybackError::Device(_))
        ));

        session.with_device_mut(|d| d.reject_play = false);
        assert!(session.retry_playback().is_ok());
    }

    #[test]
    fn restart_action_leaves_store_alone() {
        let mut store = PlayerStore::new();
        store.set_tracks(vec![track("a")]);
        let before = store.state().clone();
        EndOfTrackAction::Restart.apply(&mut store);
        assert_eq!(store.state(), &before);
    }
}
