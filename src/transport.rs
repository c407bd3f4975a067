//! Multi-track transport: one timeline, many independently playing tracks.
//!
//! `Transport` owns the track registry, the timeline clock, the frame ticker
//! driving the sampling loop and the optional drag session. It never renders
//! anything itself; every observable change is reported through a
//! [`PresentationSink`].
//!
//! The operations are split by role:
//! - `controller`: play/pause/stop state machine and per-frame sampling
//! - `seek`: atomic multi-track seeks and drag-scrub sessions
//! - `sync`: on-demand realignment to the reference track

mod clock;
mod controller;
mod error;
mod registry;
mod seek;
mod sync;
mod ticker;
mod track;
mod types;

pub use clock::TimelineClock;
pub use controller::Transport;
pub use error::{PlaybackBlocked, TrackError, TransportError};
pub use registry::{Track, TrackRegistry};
pub use seek::{DragSession, SeekOutcome};
pub use ticker::FrameTicker;
pub use track::{PlayableTrack, PresentationSink};
pub use types::{Notice, Timeline, TrackId, TransportState};
