//! Log file setup. The terminal belongs to the TUI, so diagnostics go to a
//! file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

/// Filter directives in this variable win over `log.level`.
pub const LOG_ENV: &str = "SYNCDECK_LOG";

pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber and return the log file path.
pub fn init(settings: &LogSettings) -> anyhow::Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .context("no log file location; set log.file or HOME")?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(build_filter(&settings.level))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("a global logger is already installed")?;

    Ok(path)
}
