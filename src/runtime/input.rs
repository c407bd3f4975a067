//! Key and mouse bindings, and how the resulting actions drive the transport.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::transport::{TrackId, Transport};
use crate::ui::{self, Hit, Regions};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Control(ControlCmd),
    ToggleMute(TrackId),
    SeekFraction(f64),
    BeginDrag(f64),
    DragTo(f64),
    EndDrag,
}

pub fn key_action(key: KeyEvent, scrub_seconds: f64) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Control(ControlCmd::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Control(ControlCmd::PlayPause),
        KeyCode::Char('s') => Action::Control(ControlCmd::Stop),
        KeyCode::Char('y') => Action::Control(ControlCmd::Sync),
        KeyCode::Char('h') | KeyCode::Left => Action::Control(ControlCmd::SeekBy(-scrub_seconds)),
        KeyCode::Char('l') | KeyCode::Right => Action::Control(ControlCmd::SeekBy(scrub_seconds)),
        KeyCode::Char('0') | KeyCode::Home => Action::Control(ControlCmd::SetPosition(0.0)),
        KeyCode::Char('G') | KeyCode::End => Action::SeekFraction(1.0),
        KeyCode::Char(c @ '1'..='9') => Action::ToggleMute(TrackId(c.to_digit(10)?)),
        _ => return None,
    };
    Some(action)
}

/// Map a mouse event to an action. `lanes` lists track ids top to bottom.
pub fn mouse_action(
    mouse: MouseEvent,
    regions: &Regions,
    lanes: &[TrackId],
    dragging: bool,
) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match ui::hit_test(regions, mouse.column, mouse.row) {
                Hit::ProgressBar(f) => Some(Action::BeginDrag(f)),
                Hit::Timeline(f) => Some(Action::SeekFraction(f)),
                Hit::LaneName(i) => lanes.get(i).copied().map(Action::ToggleMute),
                Hit::Nothing => None,
            }
        }
        // Off-bar positions clamp to the nearest end.
        MouseEventKind::Drag(MouseButton::Left) if dragging => Some(Action::DragTo(
            ui::column_fraction(mouse.column, regions.progress_bar),
        )),
        MouseEventKind::Up(MouseButton::Left) if dragging => Some(Action::EndDrag),
        _ => None,
    }
}

/// A left drag only continues through `Drag` and `Up` events. Anything else
/// while a session is open means the release was lost, e.g. it happened
/// outside the terminal window.
pub fn is_stale_drag(kind: MouseEventKind) -> bool {
    !matches!(
        kind,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left)
    )
}

/// Like [`mouse_action`], but first closes a drag session whose release was
/// never delivered.
pub fn mouse_actions(
    mouse: MouseEvent,
    regions: &Regions,
    lanes: &[TrackId],
    dragging: bool,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut dragging = dragging;
    if dragging && is_stale_drag(mouse.kind) {
        actions.push(Action::EndDrag);
        dragging = false;
    }
    actions.extend(mouse_action(mouse, regions, lanes, dragging));
    actions
}

/// Apply one action. Returns `true` when the app should quit.
pub fn apply(action: Action, transport: &mut Transport<App>) -> bool {
    match action {
        Action::Control(cmd) => return apply_control(cmd, transport),
        Action::ToggleMute(id) => {
            if let Ok(muted) = transport.toggle_mute(id) {
                debug!(track = %id, muted, "mute toggled");
            }
        }
        Action::SeekFraction(f) => {
            transport.seek_to_fraction(f);
        }
        Action::BeginDrag(f) => {
            transport.begin_drag();
            if let Err(e) = transport.drag_to(f) {
                debug!(error = %e, "drag start ignored");
            }
        }
        Action::DragTo(f) => {
            if let Err(e) = transport.drag_to(f) {
                debug!(error = %e, "drag move ignored");
            }
        }
        Action::EndDrag => transport.end_drag(),
    }
    false
}

fn apply_control(cmd: ControlCmd, transport: &mut Transport<App>) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        // A refused play already raised its notice.
        ControlCmd::Play => {
            let _ = transport.play();
        }
        ControlCmd::PlayPause => {
            let _ = transport.toggle_play_pause();
        }
        ControlCmd::Pause => transport.pause(),
        ControlCmd::Stop => transport.stop(),
        ControlCmd::Sync => {
            if transport.force_sync().is_none() {
                transport
                    .sink_mut()
                    .raise("No tracks loaded", std::time::Instant::now());
            }
        }
        ControlCmd::SeekBy(delta) => {
            transport.seek_by(delta);
        }
        ControlCmd::SetPosition(t) => {
            transport.seek_to(t);
        }
    }
    false
}
