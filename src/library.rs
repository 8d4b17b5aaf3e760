//! Track list: the static, ordered set of songs offered by the player.
//!
//! Tracks come either from an explicit list of paths or from scanning a
//! directory for audio files.

mod model;
mod scan;

pub use model::Track;
pub use scan::{from_paths, scan};
