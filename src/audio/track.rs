use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::Sink;
use rodio::mixer::Mixer;
use tracing::{debug, warn};

use crate::transport::{PlayableTrack, PlaybackBlocked, TrackError};

use super::sink::create_sink_at;

/// One session slot played through its own rodio `Sink`.
///
/// A file that fails to open or decode still yields a track: it reports
/// itself unavailable on `play` and `seek` instead of aborting the session.
pub struct RodioTrack {
    path: PathBuf,
    mixer: Mixer,
    sink: Option<Sink>,
    load_error: Option<String>,
    // Start offset baked into the current sink by `skip_duration`.
    offset: Duration,
    muted: bool,
    playing: bool,
}

impl RodioTrack {
    pub fn open(path: &Path, mixer: &Mixer) -> Self {
        let (sink, load_error) = match create_sink_at(mixer, path, Duration::ZERO) {
            Ok(sink) => (Some(sink), None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "track unavailable");
                (None, Some(e.to_string()))
            }
        };

        Self {
            path: path.to_path_buf(),
            mixer: mixer.clone(),
            sink,
            load_error,
            offset: Duration::ZERO,
            muted: false,
            playing: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    fn unavailable_reason(&self) -> String {
        self.load_error
            .clone()
            .unwrap_or_else(|| "media not loaded".to_string())
    }

    fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { 1.0 }
    }

    /// Replace the sink with a fresh decode starting at `target`.
    fn rebuild_at(&mut self, target: Duration) -> Result<(), TrackError> {
        let sink = create_sink_at(&self.mixer, &self.path, target)
            .map_err(|e| TrackError::Seek(e.to_string()))?;
        sink.set_volume(self.volume());
        if self.playing {
            sink.play();
        }
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.offset = target;
        Ok(())
    }
}

impl PlayableTrack for RodioTrack {
    fn play(&mut self) -> Result<(), PlaybackBlocked> {
        let Some(sink) = &self.sink else {
            return Err(PlaybackBlocked::new(self.unavailable_reason()));
        };
        sink.play();
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) -> Result<(), TrackError> {
        let Some(sink) = &self.sink else {
            return Err(TrackError::Unavailable {
                reason: self.unavailable_reason(),
            });
        };

        let target = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or_default();

        // An empty sink ignores seeks, so a finished track needs a new decode.
        if !sink.empty() {
            match sink.try_seek(target) {
                Ok(()) => {
                    self.offset = Duration::ZERO;
                    return Ok(());
                }
                Err(e) => {
                    debug!(path = %self.path.display(), error = %e, "try_seek refused, re-decoding");
                }
            }
        }

        self.rebuild_at(target)
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| (self.offset + sink.get_pos()).as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume());
        }
    }

    fn has_ended(&self) -> bool {
        self.sink.as_ref().map(Sink::empty).unwrap_or(true)
    }
}
