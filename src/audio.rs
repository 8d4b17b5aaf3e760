//! Audio playback layer.
//!
//! `types` defines the handle/output traits the controller depends on;
//! `output` and `sink` implement them on top of rodio.

mod output;
mod sink;
mod types;

pub use output::RodioOutput;
pub use sink::RodioHandle;
pub use types::{AudioHandle, AudioOutput};

#[cfg(test)]
pub(crate) mod fake;
