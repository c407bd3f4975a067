use super::*;
use std::sync::mpsc;

fn iface() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (iface, state, rx)
}

#[test]
fn handle_updates_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_playback(TransportState::Paused);
    handle.set_title("drums");
    handle.set_timeline(1.5, 20.0);

    let s = state.lock().unwrap();
    assert_eq!(s.playback, TransportState::Paused);
    assert_eq!(s.title, "drums");
    assert_eq!(s.position_micros, 1_500_000);
    assert_eq!(s.length_micros, 20_000_000);
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let (iface, state, _rx) = iface();

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = TransportState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = TransportState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn position_is_reported_in_microseconds() {
    let (iface, state, _rx) = iface();
    state.lock().unwrap().position_micros = 2_250_000;
    assert_eq!(iface.position(), 2_250_000);
}

#[test]
fn metadata_includes_expected_keys() {
    let (iface, state, _rx) = iface();
    {
        let mut s = state.lock().unwrap();
        s.title = "Session".to_string();
        s.length_micros = 42;
    }

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
    let length = i64::try_from(map["mpris:length"].clone()).unwrap();
    assert_eq!(length, 42);
}

#[test]
fn transport_methods_become_control_commands() {
    let (iface, _state, rx) = iface();

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.seek(-5_000_000);
    iface.set_position(
        ObjectPath::from_static_str_unchecked(SESSION_TRACK_ID),
        3_000_000,
    );
    // Wrong track id and negative positions are ignored.
    iface.set_position(ObjectPath::from_static_str_unchecked("/other"), 1);
    iface.set_position(
        ObjectPath::from_static_str_unchecked(SESSION_TRACK_ID),
        -1,
    );
    iface.next();

    let cmds: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        cmds,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
            ControlCmd::SeekBy(-5.0),
            ControlCmd::SetPosition(3.0),
        ]
    );
}

#[test]
fn garbage_seconds_become_zero_micros() {
    assert_eq!(micros(f64::NAN), 0);
    assert_eq!(micros(-3.0), 0);
    assert_eq!(micros(0.000_000_6), 1);
}
