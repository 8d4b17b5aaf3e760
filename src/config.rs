//! Configuration loader and schema types.
//!
//! Exposes the settings that drive the player (track source, playback
//! defaults, window title, logging) and helpers to load them from disk.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
