use std::time::Duration;

use tracing::{info, warn};

use crate::app::App;
use crate::config;
use crate::library::TrackSource;
use crate::transport::{PlayableTrack, Transport};

/// Build the transport for a session and register one track per source,
/// in order. The first source becomes the timing reference.
pub fn build_transport(
    settings: &config::Settings,
    sources: &[TrackSource],
    mut open: impl FnMut(&TrackSource) -> Box<dyn PlayableTrack>,
) -> Transport<App> {
    let t = &settings.transport;
    let app = App::new(
        sources,
        t.frame_rate,
        Duration::from_secs(settings.ui.notice_secs),
    );
    let mut transport = Transport::new(
        t.placeholder_duration_secs as f64,
        t.frame_rate,
        Duration::from_millis(t.refresh_interval_ms),
        app,
    );

    for source in sources {
        if let Err(e) = transport.register_track(source.id, open(source)) {
            warn!(track = %source.id, error = %e, "track not registered");
        }
    }
    info!(
        tracks = transport.registry().len(),
        reference = sources.first().map(|s| s.label.as_str()).unwrap_or("-"),
        "session ready"
    );
    transport
}
