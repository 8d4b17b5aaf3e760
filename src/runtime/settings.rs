//! Startup settings: a broken or missing config never stops the player.

use ::config::ConfigError;

use crate::config::Settings;

/// Settings to run with, plus why the defaults were used instead of the
/// config, if they were.
pub struct Loaded {
    pub settings: Settings,
    pub fallback: Option<String>,
}

/// Keep `loaded` when it parsed and validated, otherwise fall back to defaults.
pub fn settle(loaded: Result<Settings, ConfigError>) -> Loaded {
    let checked = loaded
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    match checked {
        Ok(settings) => Loaded {
            settings,
            fallback: None,
        },
        Err(reason) => {
            // Logging is configured from these settings, so stderr is all there is yet.
            eprintln!("spindle: {reason}; using defaults");
            Loaded {
                settings: Settings::default(),
                fallback: Some(reason),
            }
        }
    }
}

pub fn load_settings() -> Loaded {
    settle(Settings::load())
}
