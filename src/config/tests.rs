use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
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
fn resolve_config_path_prefers_syncdeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SYNCDECK_CONFIG_PATH", "/tmp/syncdeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/syncdeck-test-config.toml")
    );
}

#[test]
fn default_paths_prefer_xdg_dirs() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state-home");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("syncdeck")
            .join("config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state-home")
            .join("syncdeck")
            .join("syncdeck.log")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("syncdeck")
            .join("config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("syncdeck")
            .join("syncdeck.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[transport]
placeholder_duration_secs = 45
frame_rate = 25
refresh_interval_ms = 16

[session]
tracks = ["/music/drums.wav", "/music/bass.wav"]
max_tracks = 4

[library]
extensions = ["wav"]
recursive = true
max_depth = 2

[ui]
header_text = "hello"
ruler_major_every_secs = 10
notice_secs = 1
show_frames = false

[controls]
scrub_seconds = 9

[log]
level = "debug"
file = "/tmp/syncdeck.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SYNCDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SYNCDECK__TRANSPORT__FRAME_RATE");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.transport.placeholder_duration_secs, 45);
    assert_eq!(s.transport.frame_rate, 25);
    assert_eq!(s.transport.refresh_interval_ms, 16);
    assert_eq!(
        s.session.tracks,
        vec![
            std::path::PathBuf::from("/music/drums.wav"),
            std::path::PathBuf::from("/music/bass.wav")
        ]
    );
    assert_eq!(s.session.max_tracks, 4);
    assert_eq!(s.library.extensions, vec!["wav".to_string()]);
    assert!(s.library.recursive);
    assert_eq!(s.library.max_depth, Some(2));
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.ruler_major_every_secs, 10);
    assert_eq!(s.ui.notice_secs, 1);
    assert!(!s.ui.show_frames);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.file, Some(std::path::PathBuf::from("/tmp/syncdeck.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[transport]
frame_rate = 25
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SYNCDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SYNCDECK__TRANSPORT__FRAME_RATE", "60");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.transport.frame_rate, 60);
}

#[test]
fn explicit_config_path_must_exist() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Settings::load(Some(missing.as_path())).is_err());
}

#[test]
fn missing_default_config_falls_back_to_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "SYNCDECK_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("SYNCDECK__TRANSPORT__FRAME_RATE");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.transport.placeholder_duration_secs, 20);
    assert_eq!(s.transport.frame_rate, 30);
    assert_eq!(s.session.max_tracks, 9);
}

#[test]
fn validate_rejects_zero_rates() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.transport.frame_rate = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.transport.refresh_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.session.max_tracks = 0;
    assert!(s.validate().is_err());
}

#[test]
fn effective_settings_render_as_toml() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("[transport]"));
    assert!(text.contains("placeholder_duration_secs = 20"));
    assert!(!text.contains("max_depth"));

    let parsed: Settings = toml::from_str(&text).unwrap();
    assert_eq!(parsed.controls.scrub_seconds, 5);
}
