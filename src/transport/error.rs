//! Error types for transport operations and track handles.

use super::types::TrackId;

/// A track refused to start playing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("playback blocked: {reason}")]
pub struct PlaybackBlocked {
    pub reason: String,
}

impl PlaybackBlocked {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors reported by a single track handle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("media unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("seek failed: {0}")]
    Seek(String),
}

/// Errors raised by the transport itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("track ids start at 1")]
    InvalidTrackId,

    #[error("track {0} is already registered")]
    DuplicateTrack(TrackId),

    #[error("no track with id {0}")]
    UnknownTrack(TrackId),

    #[error("track {track} could not start")]
    PlaybackBlocked {
        track: TrackId,
        #[source]
        source: PlaybackBlocked,
    },

    #[error("no drag session is open")]
    NoDragSession,
}
