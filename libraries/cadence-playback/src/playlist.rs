//! Playlist manager
//!
//! Thin positional API over [`OrderedTrackList`]. The playlist is the source
//! of truth for which tracks exist and in what order; the player store only
//! ever sees snapshots of it.
//!
//! Duplicates are allowed: the same file can appear more than once.

use crate::list::{Iter, OrderedTrackList};
use crate::types::InsertPosition;
use cadence_core::Track;

/// Ordered, user-editable playlist
#[derive(Debug, Clone, Default)]
pub struct PlaylistManager {
    list: OrderedTrackList<Track>,
}

impl PlaylistManager {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Snapshot of the playlist, front to back
    pub fn to_vec(&self) -> Vec<Track> {
        self.list.to_vec()
    }

    /// Add to the front
    pub fn add_start(&mut self, track: Track) {
        self.list.add_first(track);
    }

    /// Add to the back
    pub fn add_end(&mut self, track: Track) {
        self.list.add_last(track);
    }

    /// Insert at `index`, clamped into `0..=size`
    pub fn insert_at(&mut self, index: i64, track: Track) {
        self.list.insert_at(index, track);
    }

    /// Add at the given position
    pub fn add(&mut self, track: Track, position: InsertPosition) {
        match position {
            InsertPosition::Start => self.add_start(track),
            InsertPosition::End => self.add_end(track),
            InsertPosition::Index(index) => self.insert_at(index, track),
        }
    }

    /// Remove the entry at `index`
    ///
    /// Returns `None` if `index` does not address an entry.
    pub fn remove_at(&mut self, index: i64) -> Option<Track> {
        self.list.remove_at(index)
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.list.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Track> {
        self.list.iter()
    }

    /// Positions of every entry for `filename`
    pub fn positions_of<'a>(&'a self, filename: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.list
            .iter()
            .enumerate()
            .filter(move |(_, track)| track.filename == filename)
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(name: &str) -> Track {
        Track::new(name, format!("Track {name}"), format!("{name}.mp3"), format!("/media/{name}.mp3"))
    }

    fn filenames(playlist: &PlaylistManager) -> Vec<String> {
        playlist.iter().map(|t| t.filename.clone()).collect()
    }

    #[test]
    fn create_empty_playlist() {
        let playlist = PlaylistManager::new();
        assert_eq!(playlist.size(), 0);
        assert!(playlist.is_empty());
        assert!(playlist.to_vec().is_empty());
    }

    #[test]
    fn add_start_and_end() {
        let mut playlist = PlaylistManager::new();
        playlist.add_end(create_test_track("b"));
        playlist.add_start(create_test_track("a"));
        playlist.add_end(create_test_track("c"));

        assert_eq!(filenames(&playlist), vec!["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn add_by_position() {
        let mut playlist = PlaylistManager::new();
        playlist.add(create_test_track("x"), InsertPosition::default());
        playlist.add(create_test_track("y"), InsertPosition::Start);
        playlist.add(create_test_track("z"), InsertPosition::Index(1));

        assert_eq!(filenames(&playlist), vec!["y.mp3", "z.mp3", "x.mp3"]);
    }

    #[test]
    fn duplicates_are_distinct_entries() {
        let mut playlist = PlaylistManager::new();
        playlist.add_end(create_test_track("a"));
        playlist.add_end(create_test_track("b"));
        playlist.add_end(create_test_track("a"));

        assert_eq!(playlist.size(), 3);
        assert_eq!(playlist.positions_of("a.mp3").collect::<Vec<_>>(), vec![0, 2]);

        let removed = playlist.remove_at(0).unwrap();
        assert_eq!(removed.filename, "a.mp3");
        assert_eq!(playlist.positions_of("a.mp3").collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn remove_invalid_index_is_none() {
        let mut playlist = PlaylistManager::new();
        assert!(playlist.remove_at(0).is_none());

        playlist.add_end(create_test_track("a"));
        assert!(playlist.remove_at(-1).is_none());
        assert!(playlist.remove_at(1).is_none());
        assert_eq!(playlist.size(), 1);
    }

    #[test]
    fn clearing_one_at_a_time() {
        let mut playlist = PlaylistManager::new();
        for name in ["a", "b", "c"] {
            playlist.add_end(create_test_track(name));
        }
        while playlist.remove_at(0).is_some() {}
        assert!(playlist.is_empty());
    }
}
