//! rodio-backed audio handle.
//!
//! A `RodioHandle` owns one `Sink` fed by a seekable decoder for a single
//! file. Looping is not done inside the sink: the controller rewinds the
//! handle when the sampler reports the end of the track.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};
use tracing::{debug, warn};

use crate::error::{PlayerError, Result};

use super::types::AudioHandle;

pub struct RodioHandle {
    path: PathBuf,
    sink: Sink,
    total: Duration,
    closed: AtomicBool,
}

pub(super) fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| PlayerError::unplayable(path, e))?;
    // `try_from(File)` records the byte length, which the decoders need to seek.
    Decoder::try_from(file).map_err(|e| PlayerError::unplayable(path, e))
}

/// Read the duration from the file's properties when the decoder can't tell.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

impl RodioHandle {
    /// Decode `path` into a new sink on `mixer`, paused at position zero.
    pub(super) fn open(mixer: &Mixer, path: &Path) -> Result<Self> {
        let source = open_decoder(path)?;

        let total = match source.total_duration() {
            Some(d) => d,
            None => probe_duration(path).unwrap_or_else(|| {
                warn!(path = %path.display(), "could not determine track length");
                Duration::ZERO
            }),
        };

        let sink = Sink::connect_new(mixer);
        sink.pause();
        sink.append(source);

        debug!(path = %path.display(), total_ms = total.as_millis() as u64, "opened track");

        Ok(Self {
            path: path.to_path_buf(),
            sink,
            total,
            closed: AtomicBool::new(false),
        })
    }
}

impl AudioHandle for RodioHandle {
    fn play(&self) {
        if !self.is_closed() {
            self.sink.play();
        }
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn seek(&self, position: Duration) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        if self.sink.empty() {
            // Ran off the end: put the track back before repositioning.
            self.sink.append(open_decoder(&self.path)?);
        }
        let target = if self.total.is_zero() {
            position
        } else {
            position.min(self.total)
        };
        self.sink
            .try_seek(target)
            .map_err(|e| PlayerError::Seek(e.to_string()))
    }

    fn rewind(&self) -> Result<()> {
        self.seek(Duration::ZERO)
    }

    fn position(&self) -> Duration {
        let pos = self.sink.get_pos();
        if self.total.is_zero() {
            pos
        } else {
            pos.min(self.total)
        }
    }

    fn duration(&self) -> Duration {
        self.total
    }

    fn is_finished(&self) -> bool {
        !self.is_closed() && self.sink.empty()
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.sink.stop();
            self.sink.clear();
            debug!(path = %self.path.display(), "closed track");
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        self.close();
    }
}
