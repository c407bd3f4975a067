use super::*;
use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::library::TrackSource;
use crate::transport::{PresentationSink, TrackId, TransportState};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn app() -> App {
    let sources: Vec<TrackSource> = ["drums", "bass"]
        .iter()
        .zip(1u32..)
        .map(|(name, id)| TrackSource {
            id: TrackId(id),
            path: PathBuf::from(format!("{name}.wav")),
            label: name.to_string(),
        })
        .collect();
    App::new(&sources, 30, Duration::from_secs(3))
}

#[test]
fn layout_regions_line_up_for_hit_testing() {
    let r = layout(Rect::new(0, 0, 100, 30));

    assert_eq!(r.lanes, Rect::new(0, 10, 100, 14));
    assert_eq!(r.lane_names, Rect::new(1, 11, NAME_WIDTH, 12));
    assert_eq!(r.lane_tracks, Rect::new(17, 11, 82, 12));
    assert_eq!(r.ruler_scale, Rect::new(17, 7, 82, 2));
    assert_eq!(r.progress_bar, Rect::new(1, 25, 84, 1));
}

#[test]
fn hit_test_maps_cells_to_targets() {
    let r = layout(Rect::new(0, 0, 100, 30));

    assert_eq!(hit_test(&r, 1, 25), Hit::ProgressBar(0.0));
    assert_eq!(hit_test(&r, 84, 25), Hit::ProgressBar(1.0));
    assert_eq!(hit_test(&r, 90, 25), Hit::Nothing);
    assert_eq!(hit_test(&r, 17, 11), Hit::Timeline(0.0));
    assert_eq!(hit_test(&r, 98, 7), Hit::Timeline(1.0));
    assert_eq!(hit_test(&r, 3, 12), Hit::LaneName(1));
    assert_eq!(hit_test(&r, 50, 1), Hit::Nothing);
}

#[test]
fn column_and_fraction_round_trip_at_the_edges() {
    let area = Rect::new(10, 0, 11, 1);
    assert_eq!(column_fraction(10, area), 0.0);
    assert_eq!(column_fraction(15, area), 0.5);
    assert_eq!(column_fraction(40, area), 1.0);
    assert_eq!(column_fraction(0, area), 0.0);
    assert_eq!(fraction_column(0.5, area), Some(15));
    assert_eq!(fraction_column(2.0, area), Some(20));
    assert_eq!(fraction_column(f64::NAN, area), Some(10));

    let narrow = Rect::new(3, 0, 1, 1);
    assert_eq!(column_fraction(3, narrow), 0.0);
    assert_eq!(fraction_column(0.7, Rect::new(3, 0, 0, 1)), None);
}

#[test]
fn ruler_marks_every_second_and_labels_majors_that_fit() {
    let (ticks, labels) = ruler_lines(11, 10.0, 5);
    assert_eq!(ticks, "┃╵╵╵╵┃╵╵╵╵┃");
    assert_eq!(labels, "00:00      ");

    let (ticks, labels) = ruler_lines(11, 0.0, 5);
    assert!(ticks.is_empty() && labels.is_empty());
}

#[test]
fn lane_and_progress_bars_place_the_playhead() {
    assert_eq!(lane_bar(5, 0.5, false), "━━┃──");
    assert_eq!(lane_bar(5, 0.5, true), "┈┈┃┈┈");
    assert_eq!(lane_bar(5, 0.0, false), "┃────");
    assert_eq!(progress_bar_chars(4, 0.5), "━━⏺─");
    assert_eq!(progress_bar_chars(4, 1.0), "━━━━");
    assert_eq!(progress_bar_chars(4, 0.0), "⏺───");
}

#[test]
fn status_text_shows_state_time_and_notice() {
    let mut app = app();
    app.on_timeline_update(4.5, 20.0);
    app.on_play_state_changed(TransportState::Playing);
    app.on_mute_changed(TrackId(2), true);
    let now = Instant::now();
    app.raise("All tracks synced", now);

    let ui = UiSettings::default();
    let text = status_text(&app, &ui, now);
    assert!(text.contains("PLAYING"));
    assert!(text.contains("00:00:04.15 / 00:00:20.00"));
    assert!(text.contains("2 track(s)"));
    assert!(text.contains("1 muted"));
    assert!(text.contains("All tracks synced"));

    let short = UiSettings {
        show_frames: false,
        ..UiSettings::default()
    };
    let text = status_text(&app, &short, now + Duration::from_secs(10));
    assert!(text.contains("00:04 / 00:20"));
    assert!(!text.contains("synced"));
}

#[test]
fn draw_renders_lanes_and_progress() {
    let mut app = app();
    app.on_timeline_update(5.0, 20.0);

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal
        .draw(|f| {
            draw(
                f,
                &app,
                &UiSettings::default(),
                &ControlsSettings::default(),
                Instant::now(),
            )
        })
        .unwrap();

    let text: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(text.contains("STOPPED"));
    assert!(text.contains("1  drums"));
    assert!(text.contains("2  bass"));
    assert!(text.contains("00:05 / 00:20"));
    assert!(text.contains("[h/l] scrub -/+5s"));
}
