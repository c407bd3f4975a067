//! Background metadata reads.
//!
//! Track lengths are not known when a session opens. The probe thread reads
//! each file's tags with lofty and posts what it found on a channel; the event
//! loop drains it between frames and feeds durations to the transport.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use lofty::prelude::*;
use tracing::{debug, warn};

use crate::library::TrackSource;
use crate::transport::TrackId;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata is ready: the track's length in seconds.
    Duration { track: TrackId, seconds: f64 },
    /// A non-empty title tag was found.
    Title { track: TrackId, title: String },
}

/// Title and length read from a file's tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeInfo {
    pub seconds: f64,
    pub title: Option<String>,
}

pub fn probe_file(path: &Path) -> Result<ProbeInfo, lofty::error::LoftyError> {
    let tagged = lofty::read_from_path(path)?;
    let seconds = tagged.properties().duration().as_secs_f64();

    let title = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| tag.title())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Ok(ProbeInfo { seconds, title })
}

/// Probe every source in order on a worker thread.
///
/// The thread exits early once the receiver is gone.
pub fn spawn_probe(sources: Vec<TrackSource>, tx: Sender<MediaEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        for source in sources {
            let info = match probe_file(&source.path) {
                Ok(info) => info,
                Err(e) => {
                    warn!(track = %source.id, path = %source.path.display(), error = %e, "metadata unreadable");
                    continue;
                }
            };
            debug!(track = %source.id, seconds = info.seconds, "metadata ready");

            if let Some(title) = info.title {
                if tx.send(MediaEvent::Title { track: source.id, title }).is_err() {
                    return;
                }
            }
            let event = MediaEvent::Duration {
                track: source.id,
                seconds: info.seconds,
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    })
}
