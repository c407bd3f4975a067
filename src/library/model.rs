use std::path::PathBuf;

use crate::transport::TrackId;

/// One media slot of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSource {
    /// Slot id, 1-based in resolution order. Slot 1 is the timing reference.
    pub id: TrackId,
    pub path: PathBuf,
    /// Short name shown in the track lanes until tags are read.
    pub label: String,
}
