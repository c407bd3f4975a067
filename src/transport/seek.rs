//! Atomic multi-track seeks and drag-scrub sessions.

use tracing::{debug, warn};

use super::controller::Transport;
use super::error::TransportError;
use super::track::PresentationSink;
use super::types::{Notice, TrackId, TransportState};

/// An open drag-scrub gesture. While one exists the drag is the only writer
/// of the playhead.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Where the playhead was when the drag started.
    pub origin: f64,
    /// Number of positions applied during this drag.
    pub moves: u32,
}

/// Result of a multi-track seek.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekOutcome {
    /// The clamped timeline position every track was asked to move to.
    pub position: f64,
    /// Tracks whose seek failed. Every other track was moved.
    pub failed: Vec<TrackId>,
}

impl SeekOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<S: PresentationSink> Transport<S> {
    /// Move the playhead and every track, muted or not, to `t` seconds.
    pub fn seek_to(&mut self, t: f64) -> SeekOutcome {
        let position = self.clock.set_current_time(t, &mut self.sink);

        let mut failed = Vec::new();
        for track in self.registry.iter_mut() {
            if let Err(e) = track.handle.seek(position) {
                debug!(track = %track.id, error = %e, "track seek failed");
                failed.push(track.id);
            }
        }

        if !failed.is_empty() {
            warn!(position, failed = ?failed, "seek did not reach every track");
            self.sink.on_notice(Notice::SeekIncomplete {
                position,
                failed: failed.clone(),
            });
        }

        SeekOutcome { position, failed }
    }

    /// Seek to a fraction of the timeline (progress bar clicks).
    pub fn seek_to_fraction(&mut self, fraction: f64) -> SeekOutcome {
        let t = clamp_fraction(fraction) * self.clock.duration();
        self.seek_to(t)
    }

    /// Seek relative to the playhead.
    pub fn seek_by(&mut self, delta: f64) -> SeekOutcome {
        let t = self.clock.current_time() + delta;
        self.seek_to(t)
    }

    /// Open a drag session. Sampling stops writing until `end_drag`.
    pub fn begin_drag(&mut self) {
        if self.drag.is_some() {
            return;
        }
        self.ticker.cancel();
        self.drag = Some(DragSession {
            origin: self.clock.current_time(),
            moves: 0,
        });
    }

    /// Apply one drag position. Each call re-seeks every track from scratch.
    pub fn drag_to(&mut self, fraction: f64) -> Result<SeekOutcome, TransportError> {
        let Some(drag) = self.drag.as_mut() else {
            return Err(TransportError::NoDragSession);
        };
        drag.moves = drag.moves.saturating_add(1);
        Ok(self.seek_to_fraction(fraction))
    }

    /// Close the drag session; sampling resumes on the next frame if playing.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        debug!(
            origin = drag.origin,
            target = self.clock.current_time(),
            moves = drag.moves,
            "drag finished"
        );
        if self.state == TransportState::Playing {
            self.ticker.arm();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

fn clamp_fraction(f: f64) -> f64 {
    if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
}
