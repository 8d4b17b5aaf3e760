//! The seam between the playback controller and the platform audio layer.
//!
//! The controller only talks to these traits, so it can be driven by rodio in
//! the real player and by an in-memory fake in tests.

use std::time::Duration;

use crate::error::Result;
use crate::library::Track;

/// An open, decoded representation of one audio file.
///
/// Handles are shared with the sampling timer thread, which only calls the
/// read-side methods (`position`, `duration`, `is_finished`) while the UI
/// thread drives playback.
pub trait AudioHandle: Send + Sync + 'static {
    /// Start or resume output.
    fn play(&self);

    /// Halt output, keeping the current position.
    fn pause(&self);

    /// Reposition to `position`, measured from the start of the track.
    fn seek(&self, position: Duration) -> Result<()>;

    /// Go back to the start, even after the track has run to its end.
    fn rewind(&self) -> Result<()>;

    fn position(&self) -> Duration;

    /// Total length of the track; `Duration::ZERO` when unknown.
    fn duration(&self) -> Duration;

    /// Whether the track has played through to its end.
    fn is_finished(&self) -> bool;

    /// Stop output and release the decoder. The handle is unusable afterwards.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// Opens tracks into playable handles.
pub trait AudioOutput {
    type Handle: AudioHandle;

    /// Open `track` paused at position zero.
    fn open(&self, track: &Track) -> Result<Self::Handle>;
}
