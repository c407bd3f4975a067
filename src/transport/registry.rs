//! Ordered set of track handles and their mute flags.

use super::error::TransportError;
use super::track::PlayableTrack;
use super::types::TrackId;

/// One registered media slot.
pub struct Track {
    pub id: TrackId,
    pub handle: Box<dyn PlayableTrack>,
    pub muted: bool,
}

/// Tracks in registration order. The first one is the timing reference.
#[derive(Default)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track. Ids must be >= 1 and unique.
    pub fn register_track(
        &mut self,
        id: TrackId,
        handle: Box<dyn PlayableTrack>,
    ) -> Result<(), TransportError> {
        if id.0 == 0 {
            return Err(TransportError::InvalidTrackId);
        }
        if self.contains(id) {
            return Err(TransportError::DuplicateTrack(id));
        }
        self.tracks.push(Track {
            id,
            handle,
            muted: false,
        });
        Ok(())
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id).collect()
    }

    /// Apply `f` to every track in registration order.
    pub fn for_each(&mut self, mut f: impl FnMut(&mut Track)) {
        for track in &mut self.tracks {
            f(track);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.iter_mut()
    }

    /// The track whose position drives the timeline.
    pub fn reference(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn is_muted(&self, id: TrackId) -> Option<bool> {
        self.get(id).map(|t| t.muted)
    }

    /// Update a track's mute flag and forward it to the handle.
    pub fn set_muted(&mut self, id: TrackId, muted: bool) -> Result<(), TransportError> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TransportError::UnknownTrack(id))?;
        track.muted = muted;
        track.handle.set_muted(muted);
        Ok(())
    }
}
