//! MPRIS D-Bus service (`org.mpris.MediaPlayer2.syncdeck`).
//!
//! The service runs on its own thread and never touches the transport: method
//! calls become [`ControlCmd`]s on a channel the event loop drains, and
//! properties are served from a snapshot the event loop keeps current through
//! [`MprisHandle`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::transport::TransportState;

pub const BUS_NAME: &str = "org.mpris.MediaPlayer2.syncdeck";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
/// The whole session is exposed as a single MPRIS track.
pub const SESSION_TRACK_ID: &str = "/org/syncdeck/session";

/// Commands from outside the event loop (D-Bus or key bindings).
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Sync,
    /// Relative seek in seconds.
    SeekBy(f64),
    /// Absolute seek in seconds.
    SetPosition(f64),
}

#[derive(Debug)]
struct SharedState {
    playback: TransportState,
    title: String,
    length_micros: i64,
    position_micros: i64,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            playback: TransportState::Stopped,
            title: String::new(),
            length_micros: 0,
            position_micros: 0,
        }
    }
}

fn micros(seconds: f64) -> i64 {
    if seconds.is_finite() {
        (seconds.max(0.0) * 1_000_000.0).round() as i64
    } else {
        0
    }
}

fn seconds(micros: i64) -> f64 {
    micros as f64 / 1_000_000.0
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: TransportState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_title(&self, title: &str) {
        if let Ok(mut s) = self.state.lock() {
            if s.title != title {
                s.title = title.to_string();
            }
        }
    }

    /// Timeline length and playhead, in seconds.
    pub fn set_timeline(&self, position: f64, length: f64) {
        if let Ok(mut s) = self.state.lock() {
            s.position_micros = micros(position);
            s.length_micros = micros(length);
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "syncdeck"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {}

    fn previous(&self) {}

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    /// `offset` is in microseconds and may be negative.
    fn seek(&self, offset: i64) {
        let _ = self.tx.send(ControlCmd::SeekBy(seconds(offset)));
    }

    /// Ignored unless `track_id` names the session track.
    fn set_position(&self, track_id: ObjectPath<'_>, position: i64) {
        if track_id.as_str() != SESSION_TRACK_ID || position < 0 {
            return;
        }
        let _ = self.tx.send(ControlCmd::SetPosition(seconds(position)));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            TransportState::Stopped => "Stopped",
            TransportState::Playing => "Playing",
            TransportState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let (title, length) = self
            .state
            .lock()
            .map(|s| (s.title.clone(), s.length_micros))
            .unwrap_or_default();

        let entries = [
            (
                "mpris:trackid",
                Value::from(ObjectPath::from_static_str_unchecked(SESSION_TRACK_ID)),
            ),
            ("xesam:title", Value::from(title)),
            ("mpris:length", Value::from(length)),
        ];
        for (key, value) in entries {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "MPRIS: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!(error = %e, "MPRIS: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                warn!(error = %e, "MPRIS: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!(error = %e, "MPRIS: failed to register player iface");
                return;
            }
            info!(name = BUS_NAME, "MPRIS service registered");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
