//! Shuffle index selection
//!
//! Shuffle here does not reorder the playlist. When a track ends with
//! shuffle on, the next one is picked uniformly from the whole playlist,
//! which may be the track that just ended.

use rand::Rng;

/// Pick a uniformly random index in `0..len`
///
/// Returns `None` for an empty playlist.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}
