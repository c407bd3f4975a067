//! The two seams of the transport: the tracks it drives and the sink it
//! reports to.

use super::error::{PlaybackBlocked, TrackError};
use super::types::{Notice, TrackId, TransportState};

/// A loaded media source the transport can drive.
///
/// Positions are in seconds. The transport only trusts `position` right after
/// it was read or after a synchronous `seek`.
pub trait PlayableTrack {
    fn play(&mut self) -> Result<(), PlaybackBlocked>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64) -> Result<(), TrackError>;
    fn position(&self) -> f64;
    fn set_muted(&mut self, muted: bool);

    /// True once the source has played out to its own end.
    fn has_ended(&self) -> bool {
        false
    }
}

/// Receives every observable transport change, synchronously.
pub trait PresentationSink {
    fn on_timeline_update(&mut self, current_time: f64, duration: f64);
    fn on_play_state_changed(&mut self, state: TransportState);
    fn on_mute_changed(&mut self, track: TrackId, muted: bool);

    fn on_notice(&mut self, _notice: Notice) {}
}
