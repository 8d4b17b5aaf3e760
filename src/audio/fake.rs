//! In-memory audio backend for tests: no device, no decoding.
//!
//! Any track whose name ends in `.txt` fails to open as unplayable.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::types::{AudioHandle, AudioOutput};

#[derive(Debug, Default)]
pub struct FakeState {
    pub path: PathBuf,
    pub position: Duration,
    pub total: Duration,
    pub playing: bool,
    pub finished: bool,
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct FakeHandle(Arc<Mutex<FakeState>>);

impl FakeHandle {
    pub fn new(state: FakeState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }
}

impl AudioHandle for FakeHandle {
    fn play(&self) {
        let mut s = self.state();
        if !s.closed {
            s.playing = true;
        }
    }

    fn pause(&self) {
        self.state().playing = false;
    }

    fn seek(&self, position: Duration) -> Result<()> {
        let mut s = self.state();
        s.position = position;
        s.finished = false;
        Ok(())
    }

    fn rewind(&self) -> Result<()> {
        self.seek(Duration::ZERO)
    }

    fn position(&self) -> Duration {
        self.state().position
    }

    fn duration(&self) -> Duration {
        self.state().total
    }

    fn is_finished(&self) -> bool {
        let s = self.state();
        !s.closed && s.finished
    }

    fn close(&self) {
        let mut s = self.state();
        s.closed = true;
        s.playing = false;
    }

    fn is_closed(&self) -> bool {
        self.state().closed
    }
}

pub type Opened = Arc<Mutex<Vec<FakeHandle>>>;

/// Opens fake handles of a fixed length and remembers every one it handed out.
pub struct FakeOutput {
    pub opened: Opened,
    pub total: Duration,
}

impl FakeOutput {
    pub fn with_total(total: Duration) -> Self {
        Self {
            opened: Arc::default(),
            total,
        }
    }
}

impl AudioOutput for FakeOutput {
    type Handle = FakeHandle;

    fn open(&self, track: &Track) -> Result<FakeHandle> {
        if track.name.ends_with(".txt") {
            return Err(PlayerError::unplayable(&track.path, "unsupported format"));
        }
        let handle = FakeHandle::new(FakeState {
            path: track.path.clone(),
            total: self.total,
            ..FakeState::default()
        });
        self.opened.lock().unwrap().push(handle.clone());
        Ok(handle)
    }
}

/// Number of handles handed out that are still open.
pub fn open_count(opened: &Opened) -> usize {
    opened.lock().unwrap().iter().filter(|h| !h.is_closed()).count()
}
