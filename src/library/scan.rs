use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{LibrarySettings, SessionSettings};
use crate::transport::TrackId;

use super::model::TrackSource;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

pub(super) fn label_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// List the audio files of `dir`, sorted by file name (case-insensitive).
pub(super) fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    files
}

/// Resolve the session's media slots.
///
/// `paths` (from the command line) win over `session.tracks`. Each entry may
/// be an audio file or a directory whose audio files are added in name order.
/// Missing paths and non-audio files are skipped with a warning. The result
/// is capped at `session.max_tracks` and numbered from 1.
pub fn resolve_sources(
    paths: &[PathBuf],
    session: &SessionSettings,
    library: &LibrarySettings,
) -> Vec<TrackSource> {
    let requested: &[PathBuf] = if paths.is_empty() {
        &session.tracks
    } else {
        paths
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for path in requested {
        if path.is_dir() {
            let found = scan_dir(path, library);
            debug!(dir = %path.display(), count = found.len(), "scanned directory");
            files.extend(found);
        } else if path.is_file() {
            if is_audio_file(path, library) {
                files.push(path.clone());
            } else {
                warn!(path = %path.display(), "skipping file with unknown audio extension");
            }
        } else {
            warn!(path = %path.display(), "skipping missing path");
        }
    }

    if files.len() > session.max_tracks {
        warn!(
            found = files.len(),
            max = session.max_tracks,
            "too many tracks, extra files ignored"
        );
        files.truncate(session.max_tracks);
    }

    files
        .into_iter()
        .zip(1u32..)
        .map(|(path, id)| TrackSource {
            id: TrackId(id),
            label: label_for(&path),
            path,
        })
        .collect()
}
