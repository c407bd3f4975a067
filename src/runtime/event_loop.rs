use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::audio::MediaEvent;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::input::{self, Action};
use crate::runtime::mpris_sync::update_mpris;
use crate::transport::{TrackId, Transport};
use crate::ui;

/// Longest wait for input while no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Fold a metadata event into the session.
pub fn apply_media_event(event: MediaEvent, transport: &mut Transport<App>) {
    match event {
        MediaEvent::Duration { track, seconds } => {
            if let Err(e) = transport.report_duration(track, seconds) {
                debug!(error = %e, "duration dropped");
            }
        }
        MediaEvent::Title { track, title } => transport.sink_mut().set_label(track, title),
    }
}

/// Main terminal event loop: metadata, frame sampling, drawing, remote
/// commands and input, in that order. Returns `Ok(())` when quit is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    transport: &mut Transport<App>,
    media_rx: &Receiver<MediaEvent>,
    control_rx: &Receiver<ControlCmd>,
    mpris: &MprisHandle,
) -> anyhow::Result<()> {
    let scrub = settings.controls.scrub_seconds as f64;

    loop {
        let now = Instant::now();

        while let Ok(ev) = media_rx.try_recv() {
            apply_media_event(ev, transport);
        }

        transport.on_frame(now);
        transport.sink_mut().expire_banner(now);
        update_mpris(mpris, transport.sink());

        let area = terminal
            .draw(|f| ui::draw(f, transport.sink(), &settings.ui, &settings.controls, now))?
            .area;
        let regions = ui::layout(area);

        while let Ok(cmd) = control_rx.try_recv() {
            if input::apply(Action::Control(cmd), transport) {
                return Ok(());
            }
        }

        let timeout = transport
            .time_until_next_frame(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        let actions: Vec<Action> = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                input::key_action(key, scrub).into_iter().collect()
            }
            Event::Mouse(mouse) => {
                let lanes: Vec<TrackId> = transport.sink().lanes.iter().map(|l| l.id).collect();
                input::mouse_actions(mouse, &regions, &lanes, transport.is_dragging())
            }
            // The release of a drag cannot arrive once the window lost focus.
            Event::FocusLost if transport.is_dragging() => vec![Action::EndDrag],
            _ => Vec::new(),
        };
        for action in actions {
            if input::apply(action, transport) {
                return Ok(());
            }
        }
    }
}
