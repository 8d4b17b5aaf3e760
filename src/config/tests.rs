use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_spindle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", "/tmp/spindle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/spindle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/xdg-state/spindle/spindle.log")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/spindle/spindle.log")
    );
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert!(!s.playback.looping);
    assert_eq!(s.playback.sample_interval_ms, 500);
    assert!(s.library.tracks.is_empty());
    assert_eq!(s.library.dir, PathBuf::from("."));
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_zero_interval_and_blank_title() {
    let mut s = Settings::default();
    s.playback.sample_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.title = "   ".into();
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
tracks = ["Gotta_Love_Me.wav", "Style - Kendrick Lamar.wav"]
extensions = ["wav"]
recursive = true

[playback]
looping = true
sample_interval_ms = 250

[ui]
title = "jukebox"
show_help = false

[log]
enabled = false
level = "debug"
file = "/tmp/spindle.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SPINDLE__PLAYBACK__LOOPING");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.library.tracks,
        vec![
            "Gotta_Love_Me.wav".to_string(),
            "Style - Kendrick Lamar.wav".to_string()
        ]
    );
    assert_eq!(s.library.extensions, vec!["wav".to_string()]);
    assert!(s.library.recursive);
    assert!(s.playback.looping);
    assert_eq!(s.playback.sample_interval_ms, 250);
    assert_eq!(s.ui.title, "jukebox");
    assert!(!s.ui.show_help);
    assert!(!s.log.enabled);
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.file, Some(PathBuf::from("/tmp/spindle.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
looping = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SPINDLE__PLAYBACK__LOOPING", "true");

    let s = Settings::load().unwrap();
    assert!(s.playback.looping);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "SPINDLE_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.sample_interval_ms, 500);
    assert_eq!(s.ui.title, UiSettings::default().title);
}
