//! Small value types shared across the transport.

use std::fmt;

/// Stable identifier of a track slot. Ids start at 1; the first registered
/// track is the timing reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The playback state of the transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Playing,
    Paused,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The logical timeline every track is kept aligned to.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Playhead position in seconds, always within `[0, duration]`.
    pub current_time: f64,
    /// Length of the timeline in seconds (whole seconds once known).
    pub duration: f64,
    /// Frames per second used when formatting timecodes.
    pub frame_rate: u32,
}

/// User-visible messages raised by transport operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A play request was refused by one of the tracks; nothing is playing.
    PlaybackBlocked { track: TrackId, reason: String },
    /// A seek reached some tracks but not all of them.
    SeekIncomplete { position: f64, failed: Vec<TrackId> },
    /// A forced sync finished; every track was moved to `position`.
    Synced { position: f64 },
}
