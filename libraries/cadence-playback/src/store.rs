//! Player store - the playback state machine
//!
//! Owns the authoritative `{tracks, current_index, playing}` triple. Every
//! mutation runs to completion, then every subscriber is called once, in
//! registration order, with the new state.
//!
//! State transitions:
//! ```text
//! Empty ──set_tracks(non-empty)──▶ Populated/Paused (index 0)
//! Populated/Paused ◀──toggle_play / set_playing──▶ Populated/Playing
//! Populated ──set_tracks([])──▶ Empty
//! next / prev / set_current / toggle_play_index stay within Populated
//! ```
//!
//! Out-of-range moves are not errors. They are ignored and nobody is notified.

use crate::types::PlayerState;
use cadence_core::Track;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Callback invoked with every new state
pub type Listener = Box<dyn FnMut(&PlayerState)>;

/// Handle returned by [`PlayerStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Playback state machine with synchronous fan-out to subscribers
pub struct PlayerStore {
    state: PlayerState,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl PlayerStore {
    /// Create an empty store: no tracks, nothing selected, paused
    pub fn new() -> Self {
        Self {
            state: PlayerState::default(),
            listeners: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Register a listener
    ///
    /// The listener is called right away with the current state, then after
    /// every mutation until it is unsubscribed.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&PlayerState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        listener(&self.state);
        self.listeners.insert(id, Box::new(listener));
        trace!(subscription = id.0, "listener subscribed");
        id
    }

    /// Drop a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        trace!(subscription = id.0, removed, "listener unsubscribed");
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the track sequence, keeping the selection valid
    ///
    /// - empty: selection cleared, transport stopped
    /// - nothing selected before: first track selected (not started)
    /// - selection past the new end: clamped to the last track
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        let len = tracks.len();
        self.state.tracks = tracks;

        if len == 0 {
            self.state.current_index = None;
            self.state.playing = false;
        } else {
            match self.state.current_index {
                None => self.state.current_index = Some(0),
                Some(index) if index >= len => self.state.current_index = Some(len - 1),
                Some(_) => {}
            }
        }

        debug!(
            len,
            current = self.state.current_index_or_unset(),
            "tracks replaced"
        );
        self.notify();
    }

    /// Set the playing flag and notify
    ///
    /// With nothing selected there is nothing to play, so the flag stays
    /// false; subscribers are still notified.
    pub fn set_playing(&mut self, playing: bool) {
        self.state.playing = playing && self.state.current_index.is_some();
        debug!(playing = self.state.playing, "playing flag set");
        self.notify();
    }

    /// Flip the playing flag
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.state.playing);
    }

    /// Play/pause `index` in place, or jump to it and start playing
    pub fn toggle_play_index(&mut self, index: i64) {
        if index == self.state.current_index_or_unset() {
            return self.toggle_play();
        }
        if !self.state.in_bounds(index) {
            trace!(index, "toggle_play_index out of range, ignored");
            return;
        }

        self.state.current_index = Some(index as usize);
        self.state.playing = true;
        debug!(index, "jumped to track");
        self.notify();
    }

    /// Select `index` without touching the playing flag
    pub fn set_current(&mut self, index: i64) {
        if !self.state.in_bounds(index) {
            trace!(index, "set_current out of range, ignored");
            return;
        }

        self.state.current_index = Some(index as usize);
        debug!(index, "current track set");
        self.notify();
    }

    /// Advance one track and play. No wraparound.
    pub fn next(&mut self) {
        let Some(current) = self.state.current_index else {
            return;
        };
        if current + 1 >= self.state.tracks.len() {
            trace!(current, "next at end of playlist, ignored");
            return;
        }

        self.state.current_index = Some(current + 1);
        self.state.playing = true;
        debug!(index = current + 1, "advanced to next track");
        self.notify();
    }

    /// Step back one track and play. No wraparound.
    pub fn prev(&mut self) {
        let Some(current) = self.state.current_index else {
            return;
        };
        if current == 0 {
            trace!("prev at start of playlist, ignored");
            return;
        }

        self.state.current_index = Some(current - 1);
        self.state.playing = true;
        debug!(index = current - 1, "stepped back to previous track");
        self.notify();
    }

    fn notify(&mut self) {
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
