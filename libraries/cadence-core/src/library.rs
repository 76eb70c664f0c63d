//! In-memory library of downloaded tracks
//!
//! The library is what the playlist draws from. It is keyed by filename and
//! keeps insertion order so listings are stable. Nothing here writes to disk;
//! the listing itself comes from the backend.

use crate::error::{CoreError, Result};
use crate::types::Track;
use std::collections::HashMap;
use std::path::Path;

/// Catalog of tracks keyed by filename
#[derive(Debug, Clone, Default)]
pub struct Library {
    tracks: Vec<Track>,
    lookup: HashMap<String, usize>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from a backend listing
    ///
    /// Later entries win when filenames repeat.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut library = Self::new();
        for track in tracks {
            library.insert(track);
        }
        library
    }

    /// Parse a JSON array of tracks as returned by the library endpoint
    pub fn from_json(raw: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(raw)?;
        Ok(Self::from_tracks(tracks))
    }

    /// Read a saved library listing from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Add or replace a track
    ///
    /// Returns the previous entry with the same filename, if any. A replaced
    /// entry keeps its position in the listing.
    pub fn insert(&mut self, track: Track) -> Option<Track> {
        if let Some(&index) = self.lookup.get(&track.filename) {
            return Some(std::mem::replace(&mut self.tracks[index], track));
        }

        self.lookup.insert(track.filename.clone(), self.tracks.len());
        self.tracks.push(track);
        None
    }

    /// Remove a track by filename
    pub fn remove(&mut self, filename: &str) -> Result<Track> {
        let index = self
            .lookup
            .remove(filename)
            .ok_or_else(|| CoreError::track_not_found(filename))?;

        let track = self.tracks.remove(index);
        self.rebuild_lookup();
        Ok(track)
    }

    /// Look up a track by filename
    pub fn get(&self, filename: &str) -> Option<&Track> {
        self.lookup.get(filename).map(|&index| &self.tracks[index])
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.lookup.contains_key(filename)
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn rebuild_lookup(&mut self) {
        self.lookup = self
            .tracks
            .iter()
            .enumerate()
            .map(|(index, track)| (track.filename.clone(), index))
            .collect();
    }
}
