//! Playback control: the controller that owns the open track and the timer
//! that samples its progress.

mod controller;
mod sampler;

pub use controller::PlaybackController;
pub use sampler::{
    ProgressUpdate, Sampler, format_mmss, format_progress, progress_percent, sample,
};
