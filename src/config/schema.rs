use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/syncdeck/config.toml` or `~/.config/syncdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SYNCDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub transport: TransportSettings,
    pub session: SessionSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Timeline length used until the first track reports its duration.
    pub placeholder_duration_secs: u64,
    /// Frames per second for the `00:MM:SS.FF` timecode.
    pub frame_rate: u32,
    /// How often the playhead samples the reference track (milliseconds).
    pub refresh_interval_ms: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            placeholder_duration_secs: 20,
            frame_rate: 30,
            refresh_interval_ms: 33,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Files or directories loaded when no paths are given on the command line.
    /// The first resolved file is the timing reference.
    pub tracks: Vec<PathBuf>,
    /// Upper bound on the number of simultaneously loaded tracks.
    pub max_tracks: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            max_tracks: 9,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when scanning a directory.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Label every N seconds on the ruler (major tick).
    pub ruler_major_every_secs: u64,
    /// How long notices stay in the status box (seconds).
    pub notice_secs: u64,
    /// Show the frame part (`.FF`) of the timecode.
    pub show_frames: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ every track, one timeline ~ ".to_string(),
            ruler_major_every_secs: 5,
            notice_secs: 3,
            show_frames: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `h` / `l`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive, overridden by `SYNCDECK_LOG`.
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/syncdeck/syncdeck.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
