//! Application model types: `App`, `Lane` and the transient notice banner.

use std::time::{Duration, Instant};

use crate::library::TrackSource;
use crate::transport::{Notice, PresentationSink, TrackId, TransportState};

use super::timecode::{format_mmss, format_timecode};

/// One row of the track view.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: TrackId,
    pub label: String,
    pub muted: bool,
}

/// A message shown in the status box until it expires.
#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub raised_at: Instant,
}

/// The main application model.
pub struct App {
    pub lanes: Vec<Lane>,
    pub current_time: f64,
    pub duration: f64,
    pub playback: TransportState,
    pub frame_rate: u32,

    /// Title shown in MPRIS metadata; the reference track's tag title once known.
    pub title: String,

    banner: Option<Banner>,
    banner_ttl: Duration,
}

impl App {
    pub fn new(sources: &[TrackSource], frame_rate: u32, banner_ttl: Duration) -> Self {
        let lanes = sources
            .iter()
            .map(|s| Lane {
                id: s.id,
                label: s.label.clone(),
                muted: false,
            })
            .collect::<Vec<_>>();
        let title = lanes
            .first()
            .map(|l| l.label.clone())
            .unwrap_or_else(|| "syncdeck".to_string());

        Self {
            lanes,
            current_time: 0.0,
            duration: 0.0,
            playback: TransportState::Stopped,
            frame_rate,
            title,
            banner: None,
            banner_ttl,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.lanes.is_empty()
    }

    pub fn lane(&self, id: TrackId) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id == id)
    }

    /// Replace a lane's label with a tag title. The reference lane also
    /// renames the session title.
    pub fn set_label(&mut self, id: TrackId, label: String) {
        let is_reference = self.lanes.first().is_some_and(|l| l.id == id);
        if let Some(lane) = self.lanes.iter_mut().find(|l| l.id == id) {
            lane.label = label.clone();
            if is_reference {
                self.title = label;
            }
        }
    }

    /// Playhead position as a fraction of the timeline, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn timecode(&self) -> String {
        format_timecode(self.current_time, self.frame_rate)
    }

    /// Post a message to the status box.
    pub fn raise(&mut self, text: impl Into<String>, now: Instant) {
        self.banner = Some(Banner {
            text: text.into(),
            raised_at: now,
        });
    }

    /// The current banner text, if it has not expired at `now`.
    pub fn banner(&self, now: Instant) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|b| now.saturating_duration_since(b.raised_at) < self.banner_ttl)
            .map(|b| b.text.as_str())
    }

    /// Drop an expired banner.
    pub fn expire_banner(&mut self, now: Instant) {
        if self.banner(now).is_none() {
            self.banner = None;
        }
    }
}

/// Human-readable text for a transport notice.
pub fn notice_text(notice: &Notice, frame_rate: u32) -> String {
    match notice {
        Notice::PlaybackBlocked { track, reason } => {
            format!("Track {track} could not start ({reason}); nothing is playing")
        }
        Notice::SeekIncomplete { position, failed } => {
            let ids = failed
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Seek to {} reached only some tracks; track(s) {ids} may be out of sync",
                format_mmss(*position)
            )
        }
        Notice::Synced { position } => {
            format!(
                "All tracks synced at {}",
                format_timecode(*position, frame_rate)
            )
        }
    }
}

impl PresentationSink for App {
    fn on_timeline_update(&mut self, current_time: f64, duration: f64) {
        self.current_time = current_time;
        self.duration = duration;
    }

    fn on_play_state_changed(&mut self, state: TransportState) {
        self.playback = state;
    }

    fn on_mute_changed(&mut self, track: TrackId, muted: bool) {
        if let Some(lane) = self.lanes.iter_mut().find(|l| l.id == track) {
            lane.muted = muted;
        }
    }

    fn on_notice(&mut self, notice: Notice) {
        let text = notice_text(&notice, self.frame_rate);
        self.raise(text, Instant::now());
    }
}
