use super::*;
use crate::library::TrackSource;
use crate::transport::{Notice, PresentationSink, TrackId, TransportState};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn src(id: u32, label: &str) -> TrackSource {
    TrackSource {
        id: TrackId(id),
        path: PathBuf::from(format!("/music/{label}.wav")),
        label: label.into(),
    }
}

fn app() -> App {
    App::new(
        &[src(1, "drums"), src(2, "bass"), src(3, "vox")],
        30,
        Duration::from_secs(3),
    )
}

#[test]
fn new_app_has_one_lane_per_source_and_reference_title() {
    let app = app();
    assert_eq!(app.lanes.len(), 3);
    assert!(app.has_tracks());
    assert_eq!(app.title, "drums");
    assert_eq!(app.playback, TransportState::Stopped);
    assert!(app.lanes.iter().all(|l| !l.muted));

    let empty = App::new(&[], 30, Duration::from_secs(3));
    assert!(!empty.has_tracks());
    assert_eq!(empty.title, "syncdeck");
}

#[test]
fn sink_callbacks_update_the_model() {
    let mut app = app();
    app.on_timeline_update(4.5, 20.0);
    app.on_play_state_changed(TransportState::Playing);
    app.on_mute_changed(TrackId(2), true);
    app.on_mute_changed(TrackId(9), true);

    assert_eq!(app.current_time, 4.5);
    assert_eq!(app.duration, 20.0);
    assert_eq!(app.playback, TransportState::Playing);
    assert!(app.lane(TrackId(2)).unwrap().muted);
    assert!(!app.lane(TrackId(1)).unwrap().muted);
    assert_eq!(app.timecode(), "00:00:04.15");
    assert!((app.progress() - 0.225).abs() < 1e-9);
}

#[test]
fn progress_is_zero_without_duration() {
    let mut app = app();
    app.on_timeline_update(3.0, 0.0);
    assert_eq!(app.progress(), 0.0);
}

#[test]
fn labels_follow_tag_titles_and_reference_renames_session() {
    let mut app = app();
    app.set_label(TrackId(2), "Bass DI".into());
    assert_eq!(app.lane(TrackId(2)).unwrap().label, "Bass DI");
    assert_eq!(app.title, "drums");

    app.set_label(TrackId(1), "Kit Overheads".into());
    assert_eq!(app.title, "Kit Overheads");
}

#[test]
fn banner_expires_after_ttl() {
    let mut app = app();
    let t0 = Instant::now();
    app.raise("hello", t0);

    assert_eq!(app.banner(t0 + Duration::from_secs(1)), Some("hello"));
    assert_eq!(app.banner(t0 + Duration::from_secs(3)), None);

    app.expire_banner(t0 + Duration::from_secs(1));
    assert!(app.banner(t0 + Duration::from_secs(1)).is_some());
    app.expire_banner(t0 + Duration::from_secs(5));
    assert!(app.banner(t0).is_none());
}

#[test]
fn notices_become_banners() {
    let mut app = app();
    app.on_notice(Notice::PlaybackBlocked {
        track: TrackId(3),
        reason: "cannot open".into(),
    });
    let text = app.banner(Instant::now()).unwrap().to_string();
    assert!(text.contains("Track 3"));
    assert!(text.contains("cannot open"));
}

#[test]
fn notice_text_names_failed_tracks_and_sync_position() {
    let seek = notice_text(
        &Notice::SeekIncomplete {
            position: 65.0,
            failed: vec![TrackId(2), TrackId(3)],
        },
        30,
    );
    assert!(seek.contains("01:05"));
    assert!(seek.contains("2, 3"));

    let synced = notice_text(&Notice::Synced { position: 1.5 }, 30);
    assert!(synced.contains("00:00:01.15"));
}
