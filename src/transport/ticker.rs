//! A one-shot frame request that the callback re-arms itself.
//!
//! This is the transport's equivalent of an animation-frame callback: it is
//! armed, fires at most once per refresh interval, and has to be armed again
//! by whoever handled the frame. `cancel` takes effect immediately, so a
//! cancelled ticker can never fire "one more time".

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    armed: bool,
    last_fired: Option<Instant>,
}

impl FrameTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            armed: false,
            last_fired: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request one more frame.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consume the pending request if a frame is due at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if !self.armed {
            return false;
        }
        let due = match self.last_fired {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.armed = false;
            self.last_fired = Some(now);
        }
        due
    }

    /// Time left until the pending request becomes due, if one is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if !self.armed {
            return None;
        }
        Some(match self.last_fired {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }
}
