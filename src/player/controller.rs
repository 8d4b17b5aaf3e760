//! The playback controller: the only owner of the open audio handle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioHandle, AudioOutput};
use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::sampler::Sampler;

/// Holds at most one open handle plus the session's looping flag, and drives
/// the sampling timer through playback transitions.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    handle: Option<Arc<O::Handle>>,
    current: Option<Track>,
    looping: bool,
    session: u64,
    sampler: Sampler,
}

impl<O: AudioOutput> PlaybackController<O> {
    pub fn new(output: O, looping: bool, sampler: Sampler) -> Self {
        Self {
            output,
            handle: None,
            current: None,
            looping,
            session: 0,
            sampler,
        }
    }

    /// Open `selection` and start playing it, replacing whatever was open.
    ///
    /// The previous handle is closed before the new file is opened, so a
    /// failed open leaves nothing open at all. Every attempt starts a new
    /// session, successful or not.
    pub fn play(&mut self, selection: Option<&Track>) -> Result<()> {
        let Some(track) = selection else {
            return Err(PlayerError::NoSelection);
        };

        self.release();
        // Readings still queued from the released track now belong to an old session.
        self.session += 1;

        let handle = match self.output.open(track) {
            Ok(h) => Arc::new(h),
            Err(e) => {
                warn!(track = %track.name, error = %e, "failed to open track");
                return Err(e);
            }
        };

        handle.play();
        self.sampler.start(handle.clone() as Arc<dyn AudioHandle>, self.session);

        info!(
            track = %track.name,
            session = self.session,
            looping = self.looping,
            "playing"
        );
        self.handle = Some(handle);
        self.current = Some(track.clone());
        Ok(())
    }

    /// Halt playback and the timer, keeping the position.
    pub fn stop(&mut self) {
        self.sampler.stop();
        if let Some(h) = &self.handle {
            h.pause();
            self.sampler.publish_now(h.as_ref(), self.session);
            debug!(position_ms = h.position().as_millis() as u64, "stopped");
        }
    }

    /// Go back to the start of the open track and resume playing.
    pub fn reset(&mut self) -> Result<()> {
        let Some(h) = self.handle.clone() else {
            return Ok(());
        };
        h.rewind()?;
        h.play();
        self.sampler.start(h as Arc<dyn AudioHandle>, self.session);
        debug!("reset to start");
        Ok(())
    }

    /// Flip the looping flag and return the new value.
    ///
    /// The flag is consulted when the open track reaches its end, so the
    /// change applies to the open handle from its next loop boundary on.
    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        debug!(looping = self.looping, open = self.is_open(), "looping toggled");
        self.looping
    }

    /// Move to `fraction` (clamped to `[0, 1]`) of the open track's length.
    ///
    /// Returns the new position, or `None` when nothing is open.
    pub fn seek(&mut self, fraction: f64) -> Result<Option<Duration>> {
        let Some(h) = &self.handle else {
            return Ok(None);
        };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let target = h.duration().mul_f64(fraction);
        if let Err(e) = h.seek(target) {
            warn!(error = %e, "seek failed");
            return Err(e);
        }
        self.sampler.publish_now(h.as_ref(), self.session);
        debug!(target_ms = target.as_millis() as u64, "seeked");
        Ok(Some(target))
    }

    /// React to the sampler reporting that the open track ran out.
    ///
    /// Only acts while the timer runs: a stopped track stays stopped even if
    /// it sits at its end.
    pub fn on_track_end(&mut self) -> Result<()> {
        let Some(h) = self.handle.clone() else {
            return Ok(());
        };
        if !self.sampler.is_running() || !h.is_finished() {
            return Ok(());
        }

        if self.looping {
            h.rewind()?;
            h.play();
            debug!(session = self.session, "looping back to start");
        } else {
            self.sampler.stop();
            debug!(session = self.session, "track ended");
        }
        Ok(())
    }

    /// Stop the timer and release the open handle. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.sampler.stop();
        if let Some(h) = self.handle.take() {
            h.pause();
            h.close();
        }
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_closed())
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_running()
    }

    /// Id of the current playback session; bumped by every `play` with a selection.
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn position(&self) -> Option<Duration> {
        self.handle.as_ref().map(|h| h.position())
    }

    pub fn total(&self) -> Option<Duration> {
        self.handle.as_ref().map(|h| h.duration())
    }
}

impl<O: AudioOutput> Drop for PlaybackController<O> {
    fn drop(&mut self) {
        self.release();
    }
}
