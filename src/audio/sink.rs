//! Opening and decoding a file into a paused `Sink` at a start offset.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use super::error::LoadError;

/// Create a paused `Sink` on `mixer` for `path`, starting at `start_at`.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // Fallback seek primitive for sources that refuse `try_seek`.
        .skip_duration(start_at);

    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.append(source);
    Ok(sink)
}
