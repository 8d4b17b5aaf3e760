//! Error type shared by the audio layer and the playback controller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Play was requested with nothing selected in the track list.
    #[error("no track selected")]
    NoSelection,

    /// The file could not be opened or decoded.
    #[error("cannot play {}: {reason}", path.display())]
    UnplayableFormat { path: PathBuf, reason: String },

    /// The decoder refused to reposition the stream.
    #[error("seek failed: {0}")]
    Seek(String),

    /// No usable audio output device.
    #[error("audio output unavailable: {0}")]
    Output(String),
}

impl PlayerError {
    pub fn unplayable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::UnplayableFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
