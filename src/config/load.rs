use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers an optional config file under environment
/// variables (prefix `SYNCDECK__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and an optional config file.
    ///
    /// `explicit` (the `--config` flag) wins over `SYNCDECK_CONFIG_PATH` and
    /// the XDG default. An explicit file must exist; the others are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(::config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = resolve_config_path() {
                    builder =
                        builder.add_source(::config::File::from(path.as_path()).required(false));
                }
            }
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SYNCDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.transport.frame_rate == 0 {
            return Err("transport.frame_rate must be >= 1".to_string());
        }
        if self.transport.refresh_interval_ms == 0 {
            return Err("transport.refresh_interval_ms must be >= 1".to_string());
        }
        if self.transport.placeholder_duration_secs == 0 {
            return Err("transport.placeholder_duration_secs must be >= 1".to_string());
        }
        if self.session.max_tracks == 0 {
            return Err("session.max_tracks must be >= 1".to_string());
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `SYNCDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SYNCDECK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/syncdeck/config.toml`
/// or `~/.config/syncdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("syncdeck").join("config.toml"))
}

/// Compute the default log file path under `$XDG_STATE_HOME/syncdeck/` or
/// `~/.local/state/syncdeck/`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("syncdeck").join("syncdeck.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
