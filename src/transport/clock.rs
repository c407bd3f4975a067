//! The single authoritative "current time" and "total duration".

use tracing::{debug, warn};

use super::track::PresentationSink;
use super::types::Timeline;

/// Owns the [`Timeline`]. Every mutation is reported to the sink passed in,
/// even when the requested value was clamped or did not change anything.
///
/// The duration is the max of every reported length. The startup placeholder
/// is not itself a reported value, so it never takes part in that max.
#[derive(Debug, Clone)]
pub struct TimelineClock {
    timeline: Timeline,
    duration_known: bool,
}

impl TimelineClock {
    /// Create a clock that runs on `placeholder_duration` seconds until the
    /// first track reports its real length.
    pub fn new(placeholder_duration: f64, frame_rate: u32) -> Self {
        Self {
            timeline: Timeline {
                current_time: 0.0,
                duration: placeholder_duration.max(1.0),
                frame_rate: frame_rate.max(1),
            },
            duration_known: false,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.timeline.current_time
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration
    }

    pub fn frame_rate(&self) -> u32 {
        self.timeline.frame_rate
    }

    /// Whether any track has reported a duration yet.
    pub fn is_duration_known(&self) -> bool {
        self.duration_known
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Clamp `t` into `[0, duration]`, store it and return the stored value.
    pub fn set_current_time(&mut self, t: f64, sink: &mut dyn PresentationSink) -> f64 {
        let clamped = clamp_time(t, self.timeline.duration);
        self.timeline.current_time = clamped;
        self.notify(sink);
        clamped
    }

    /// Fold a track's reported length into the timeline duration.
    ///
    /// The first report replaces the placeholder; later reports only grow it.
    pub fn report_duration(&mut self, seconds: f64, sink: &mut dyn PresentationSink) {
        if !seconds.is_finite() || seconds <= 0.0 {
            warn!(seconds, "ignoring unusable track duration");
            return;
        }

        let whole = seconds.ceil();
        let previous = self.timeline.duration;
        self.timeline.duration = if self.duration_known {
            previous.max(whole)
        } else {
            whole
        };
        self.duration_known = true;

        if self.timeline.current_time > self.timeline.duration {
            self.timeline.current_time = self.timeline.duration;
        }

        debug!(
            reported = seconds,
            previous,
            duration = self.timeline.duration,
            "timeline duration updated"
        );
        self.notify(sink);
    }

    /// Push the current `(current_time, duration)` pair to the sink.
    pub fn notify(&self, sink: &mut dyn PresentationSink) {
        sink.on_timeline_update(self.timeline.current_time, self.timeline.duration);
    }
}

fn clamp_time(t: f64, duration: f64) -> f64 {
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Notice, TrackId, TransportState};

    #[derive(Default)]
    struct Updates(Vec<(f64, f64)>);

    impl PresentationSink for Updates {
        fn on_timeline_update(&mut self, current_time: f64, duration: f64) {
            self.0.push((current_time, duration));
        }
        fn on_play_state_changed(&mut self, _state: TransportState) {}
        fn on_mute_changed(&mut self, _track: TrackId, _muted: bool) {}
        fn on_notice(&mut self, _notice: Notice) {}
    }

    #[test]
    fn set_current_time_clamps_and_always_notifies() {
        let mut clock = TimelineClock::new(20.0, 30);
        let mut sink = Updates::default();

        assert_eq!(clock.set_current_time(-3.0, &mut sink), 0.0);
        assert_eq!(clock.set_current_time(99.0, &mut sink), 20.0);
        assert_eq!(clock.set_current_time(7.5, &mut sink), 7.5);
        assert_eq!(clock.set_current_time(f64::NAN, &mut sink), 0.0);

        assert_eq!(sink.0, vec![(0.0, 20.0), (20.0, 20.0), (7.5, 20.0), (0.0, 20.0)]);
    }

    #[test]
    fn duration_grows_to_the_longest_track_and_never_shrinks() {
        let mut clock = TimelineClock::new(20.0, 30);
        let mut sink = Updates::default();
        assert!(!clock.is_duration_known());

        clock.report_duration(24.2, &mut sink);
        assert_eq!(clock.duration(), 25.0);
        clock.report_duration(18.0, &mut sink);
        assert_eq!(clock.duration(), 25.0);
        clock.report_duration(31.01, &mut sink);
        assert_eq!(clock.duration(), 32.0);
        clock.report_duration(3.0, &mut sink);
        assert_eq!(clock.duration(), 32.0);
        assert!(clock.is_duration_known());
        assert_eq!(sink.0.len(), 4);
    }

    #[test]
    fn first_report_replaces_placeholder_and_clamps_playhead() {
        let mut clock = TimelineClock::new(20.0, 30);
        let mut sink = Updates::default();
        clock.set_current_time(15.0, &mut sink);

        clock.report_duration(11.5, &mut sink);
        assert_eq!(clock.duration(), 12.0);
        assert_eq!(clock.current_time(), 12.0);
        assert_eq!(sink.0.last(), Some(&(12.0, 12.0)));
    }

    #[test]
    fn unusable_durations_are_ignored() {
        let mut clock = TimelineClock::new(20.0, 30);
        let mut sink = Updates::default();
        clock.report_duration(f64::NAN, &mut sink);
        clock.report_duration(0.0, &mut sink);
        clock.report_duration(-4.0, &mut sink);
        assert_eq!(clock.duration(), 20.0);
        assert!(!clock.is_duration_known());
        assert!(sink.0.is_empty());
    }
}
