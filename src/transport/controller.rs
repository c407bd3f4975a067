//! Transport state machine and the reference-driven sampling loop.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::clock::TimelineClock;
use super::error::TransportError;
use super::registry::TrackRegistry;
use super::seek::DragSession;
use super::ticker::FrameTicker;
use super::track::{PlayableTrack, PresentationSink};
use super::types::{Notice, TrackId, TransportState};

/// Keeps every registered track on one timeline.
///
/// All methods run on the caller's thread; nothing here blocks or spawns.
/// The owner is expected to call [`Transport::on_frame`] from its event loop
/// at least once per refresh interval while [`Transport::time_until_next_frame`]
/// returns `Some`.
pub struct Transport<S: PresentationSink> {
    pub(super) registry: TrackRegistry,
    pub(super) clock: TimelineClock,
    pub(super) state: TransportState,
    pub(super) ticker: FrameTicker,
    pub(super) drag: Option<DragSession>,
    pub(super) sink: S,
}

impl<S: PresentationSink> Transport<S> {
    /// Build a stopped transport and push the initial timeline and state to
    /// `sink`.
    pub fn new(
        placeholder_duration: f64,
        frame_rate: u32,
        refresh_interval: Duration,
        sink: S,
    ) -> Self {
        let mut transport = Self {
            registry: TrackRegistry::new(),
            clock: TimelineClock::new(placeholder_duration, frame_rate),
            state: TransportState::Stopped,
            ticker: FrameTicker::new(refresh_interval),
            drag: None,
            sink,
        };
        transport.clock.notify(&mut transport.sink);
        transport.sink.on_play_state_changed(transport.state);
        transport
    }

    pub fn register_track(
        &mut self,
        id: TrackId,
        handle: Box<dyn PlayableTrack>,
    ) -> Result<(), TransportError> {
        self.registry.register_track(id, handle)?;
        debug!(track = %id, "track registered");
        Ok(())
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn duration(&self) -> f64 {
        self.clock.duration()
    }

    pub fn clock(&self) -> &TimelineClock {
        &self.clock
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// A track's metadata became known.
    pub fn report_duration(&mut self, track: TrackId, seconds: f64) -> Result<(), TransportError> {
        if !self.registry.contains(track) {
            warn!(track = %track, "duration reported for unknown track");
            return Err(TransportError::UnknownTrack(track));
        }
        self.clock.report_duration(seconds, &mut self.sink);
        Ok(())
    }

    /// Start every track. Either all of them start or none is left playing.
    pub fn play(&mut self) -> Result<(), TransportError> {
        if self.state == TransportState::Playing {
            return Ok(());
        }

        let mut started: Vec<TrackId> = Vec::with_capacity(self.registry.len());
        let mut blocked = None;
        for track in self.registry.iter_mut() {
            match track.handle.play() {
                Ok(()) => started.push(track.id),
                Err(e) => {
                    blocked = Some((track.id, e));
                    break;
                }
            }
        }

        if let Some((id, source)) = blocked {
            self.registry.for_each(|t| {
                if started.contains(&t.id) {
                    t.handle.pause();
                }
            });
            warn!(track = %id, reason = %source.reason, "play blocked, rolled back");
            self.sink.on_notice(Notice::PlaybackBlocked {
                track: id,
                reason: source.reason.clone(),
            });
            return Err(TransportError::PlaybackBlocked { track: id, source });
        }

        self.set_state(TransportState::Playing);
        if self.drag.is_none() {
            self.ticker.arm();
        }
        Ok(())
    }

    /// Pause every track, keeping the playhead where the last sample left it.
    pub fn pause(&mut self) {
        if self.state != TransportState::Playing {
            return;
        }
        self.ticker.cancel();
        self.set_state(TransportState::Paused);
        self.registry.for_each(|t| t.handle.pause());
    }

    /// Pause every track and rewind the whole session to 0.
    pub fn stop(&mut self) {
        self.ticker.cancel();
        self.set_state(TransportState::Stopped);
        self.registry.for_each(|t| t.handle.pause());
        self.seek_to(0.0);
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), TransportError> {
        if self.state == TransportState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Flip a track's mute flag. Returns the new flag.
    pub fn toggle_mute(&mut self, id: TrackId) -> Result<bool, TransportError> {
        let Some(muted) = self.registry.is_muted(id) else {
            warn!(track = %id, "mute toggle for unknown track");
            return Err(TransportError::UnknownTrack(id));
        };
        self.registry.set_muted(id, !muted)?;
        self.sink.on_mute_changed(id, !muted);
        Ok(!muted)
    }

    /// Run the sampling callback if its frame is due.
    pub fn on_frame(&mut self, now: Instant) {
        if !self.ticker.fire_if_due(now) {
            return;
        }
        self.sample();
        if self.state == TransportState::Playing && self.drag.is_none() {
            self.ticker.arm();
        }
    }

    /// How long the owner may wait before calling `on_frame` again.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    fn sample(&mut self) {
        if self.state != TransportState::Playing || self.drag.is_some() {
            return;
        }
        let Some(position) = self.registry.reference().map(|t| t.handle.position()) else {
            return;
        };
        let now = self.clock.set_current_time(position, &mut self.sink);

        let all_ended =
            !self.registry.is_empty() && self.registry.iter().all(|t| t.handle.has_ended());
        if position >= self.clock.duration() || all_ended {
            info!(position = now, "end of timeline reached");
            self.stop();
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state == state {
            return;
        }
        debug!(from = ?self.state, to = ?state, "transport state change");
        self.state = state;
        self.sink.on_play_state_changed(state);
    }
}
