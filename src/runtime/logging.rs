//! File logging for the player.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a log file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

/// Where log output should go, or `None` when logging is off.
pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    if !settings.enabled {
        return None;
    }
    settings.file.clone().or_else(default_log_path)
}

/// `RUST_LOG` if set, otherwise the configured level.
fn filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Failures are reported on stderr and the
/// player keeps running without logs.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let path = log_path(settings)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("spindle: cannot create log directory {}: {e}", parent.display());
            return None;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("spindle: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let result = tracing_subscriber::registry()
        .with(filter(settings))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    match result {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("spindle: logging disabled: {e}");
            None
        }
    }
}
