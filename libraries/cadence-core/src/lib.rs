//! Cadence Core
//!
//! Platform-agnostic core types and error handling for Cadence.
//!
//! This crate provides the building blocks shared by the playback library and
//! the player front-end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, the immutable value that flows through playlists
//! - **Library**: an in-memory catalog of downloaded tracks keyed by filename
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Library, Track};
//!
//! let track = Track::new("a1", "Intro", "intro.mp3", "/media/intro.mp3")
//!     .with_author("Some Band")
//!     .with_duration(182.0);
//!
//! let mut library = Library::new();
//! library.insert(track);
//! assert!(library.contains("intro.mp3"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use library::Library;
pub use types::{Track, UNKNOWN_AUTHOR};
