use rodio::{OutputStream, OutputStreamBuilder};
use tracing::info;

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::sink::RodioHandle;
use super::types::AudioOutput;

/// The default system output device.
///
/// Must outlive every handle it opened: dropping the stream silences them.
pub struct RodioOutput {
    stream: OutputStream,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land on
        // top of the terminal UI.
        stream.log_on_drop(false);
        info!("opened default audio output");
        Ok(Self { stream })
    }
}

impl AudioOutput for RodioOutput {
    type Handle = RodioHandle;

    fn open(&self, track: &Track) -> Result<RodioHandle> {
        RodioHandle::open(self.stream.mixer(), &track.path)
    }
}
