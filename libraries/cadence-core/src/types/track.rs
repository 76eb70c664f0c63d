/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shown in place of a missing author
pub const UNKNOWN_AUTHOR: &str = "Unknown Artist";

/// Downloaded audio track
///
/// A track is an immutable value once built. Its identity is `filename`;
/// two entries with the same filename are the same track even if they were
/// obtained separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Backend identifier (e.g. the source video id)
    pub id: String,

    /// Track title
    pub title: String,

    /// Author / uploader name
    #[serde(default)]
    pub author: Option<String>,

    /// Duration in seconds, when the backend knows it
    #[serde(default)]
    pub duration: Option<f64>,

    /// File name in the library (unique key)
    pub filename: String,

    /// Playable URI handed to the playback device
    pub src: String,

    /// Artwork URI
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        filename: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: None,
            duration: None,
            filename: filename.into(),
            src: src.into(),
            thumbnail: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Get the duration as a `Duration`
    ///
    /// Returns `None` when unknown, negative, not finite or too large.
    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Author name for display
    pub fn display_author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|author| !author.trim().is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Placeholder glyph shown when there is no thumbnail
    pub fn initial(&self) -> char {
        self.title
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Whether two tracks refer to the same library file
    pub fn same_file(&self, other: &Track) -> bool {
        self.filename == other.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new("id1", "Test Song", "song.mp3", "/media/song.mp3");
        assert_eq!(track.title, "Test Song");
        assert_eq!(track.filename, "song.mp3");
        assert!(track.author.is_none());
        assert!(track.thumbnail.is_none());
    }

    #[test]
    fn track_duration_conversion() {
        let track = Track::new("id1", "Song", "song.mp3", "/song.mp3").with_duration(180.0);
        assert_eq!(track.duration_hint(), Some(Duration::from_secs(180)));

        let bogus = Track::new("id2", "Song", "b.mp3", "/b.mp3").with_duration(f64::NAN);
        assert_eq!(bogus.duration_hint(), None);

        let negative = Track::new("id3", "Song", "c.mp3", "/c.mp3").with_duration(-1.0);
        assert_eq!(negative.duration_hint(), None);

        let huge = Track::new("id4", "Song", "d.mp3", "/d.mp3").with_duration(1e30);
        assert_eq!(huge.duration_hint(), None);
    }

    #[test]
    fn initial_falls_back_to_question_mark() {
        let track = Track::new("id1", "éclair", "a.mp3", "/a.mp3");
        assert_eq!(track.initial(), 'É');

        let untitled = Track::new("id2", "", "b.mp3", "/b.mp3");
        assert_eq!(untitled.initial(), '?');
    }

    #[test]
    fn deserializes_backend_listing_entry() {
        let json = r#"{
            "id": "abc",
            "title": "Song",
            "author": null,
            "duration": 201,
            "filename": "Song [abc].mp3",
            "src": "/media/Song%20%5Babc%5D.mp3",
            "thumbnail": null
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "abc");
        assert_eq!(track.author, None);
        assert_eq!(track.duration, Some(201.0));
        assert_eq!(track.display_author(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let json = r#"{"id": "x", "title": "T", "filename": "t.mp3", "src": "/media/t.mp3"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.duration.is_none());
        assert!(track.thumbnail.is_none());
    }

    #[test]
    fn identity_is_filename() {
        let a = Track::new("1", "A", "same.mp3", "/media/same.mp3");
        let b = Track::new("2", "B", "same.mp3", "/other/same.mp3");
        assert!(a.same_file(&b));
        assert_ne!(a, b);
    }
}
