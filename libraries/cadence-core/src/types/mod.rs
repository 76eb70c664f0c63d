mod track;

pub use track::{Track, UNKNOWN_AUTHOR};
