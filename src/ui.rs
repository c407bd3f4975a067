//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the `App` model with `ratatui`: header, status line,
//! second ruler, one lane per track with a shared playhead, the progress bar
//! and the controls footer.

mod layout;

pub use layout::{Hit, NAME_WIDTH, Regions, column_fraction, fraction_column, hit_test, layout};

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, format_mmss, format_timecode};
use crate::config::{ControlsSettings, UiSettings};
use crate::transport::TransportState;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        "[y] sync".to_string(),
        "[1-9] mute".to_string(),
        format!("[h/l] scrub -/+{scrub_seconds}s"),
        "[0/G] start/end".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn state_label(state: TransportState) -> &'static str {
    match state {
        TransportState::Playing => "▶ PLAYING",
        TransportState::Paused => "⏸ PAUSED",
        TransportState::Stopped => "⏹ STOPPED",
    }
}

/// Build the status line: state, timecode, track count and any live notice.
pub(crate) fn status_text(app: &App, ui: &UiSettings, now: Instant) -> String {
    let (position, length) = if ui.show_frames {
        (
            format_timecode(app.current_time, app.frame_rate),
            format_timecode(app.duration, app.frame_rate),
        )
    } else {
        (format_mmss(app.current_time), format_mmss(app.duration))
    };

    let mut parts = vec![
        state_label(app.playback).to_string(),
        format!("{position} / {length}"),
        format!("{} track(s)", app.lanes.len()),
    ];
    let muted = app.lanes.iter().filter(|l| l.muted).count();
    if muted > 0 {
        parts.push(format!("{muted} muted"));
    }
    if let Some(text) = app.banner(now) {
        parts.push(text.to_string());
    }
    parts.join(" • ")
}

/// Tick and label rows for a ruler `width` cells wide covering `duration`
/// seconds. Every whole second gets a minor tick; every `major_every`
/// seconds gets a major tick and, where it fits, an `MM:SS` label.
pub(crate) fn ruler_lines(width: u16, duration: f64, major_every: u64) -> (String, String) {
    let w = usize::from(width);
    let mut ticks = vec![' '; w];
    let mut labels = vec![' '; w];
    if w == 0 || !(duration > 0.0) {
        return (String::new(), String::new());
    }

    let major_every = major_every.max(1);
    let area = ratatui::layout::Rect::new(0, 0, width, 1);
    let mut next_free = 0usize;

    for s in 0..=duration.floor() as u64 {
        let Some(col) = fraction_column(s as f64 / duration, area) else {
            continue;
        };
        let col = usize::from(col);
        let major = s % major_every == 0;
        if major {
            ticks[col] = '┃';
            let label: Vec<char> = format_mmss(s as f64).chars().collect();
            if col >= next_free && col + label.len() <= w {
                labels[col..col + label.len()].copy_from_slice(&label);
                next_free = col + label.len() + 1;
            }
        } else if ticks[col] == ' ' {
            ticks[col] = '╵';
        }
    }

    (ticks.into_iter().collect(), labels.into_iter().collect())
}

/// One lane's timeline cells: played part, playhead, remainder.
pub(crate) fn lane_bar(width: u16, progress: f64, muted: bool) -> String {
    let area = ratatui::layout::Rect::new(0, 0, width, 1);
    let Some(head) = fraction_column(progress, area) else {
        return String::new();
    };
    let (played, rest) = if muted { ('┈', '┈') } else { ('━', '─') };
    (0..width)
        .map(|i| match i.cmp(&head) {
            std::cmp::Ordering::Less => played,
            std::cmp::Ordering::Equal => '┃',
            std::cmp::Ordering::Greater => rest,
        })
        .collect()
}

/// Progress bar cells, filled up to `progress`.
pub(crate) fn progress_bar_chars(width: u16, progress: f64) -> String {
    let w = usize::from(width);
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (w as f64 * p) as usize;
    let mut bar: Vec<char> = vec!['─'; w];
    for c in bar.iter_mut().take(filled) {
        *c = '━';
    }
    if filled < w {
        bar[filled] = '⏺';
    }
    bar.into_iter().collect()
}

fn lane_name(label: &str, index: usize, muted: bool) -> String {
    let mark = if muted { 'M' } else { ' ' };
    let max = usize::from(NAME_WIDTH).saturating_sub(5);
    let short: String = label.chars().take(max).collect();
    format!("{}{mark} {short}", index + 1)
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    now: Instant,
) {
    let regions = layout(frame.area());
    let side_padding = Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    };

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" syncdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, regions.header);

    let status = Paragraph::new(status_text(app, ui_settings, now))
        .block(
            Block::bordered()
                .padding(side_padding)
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, regions.status);

    // Ruler
    let (ticks, labels) = ruler_lines(
        regions.ruler_scale.width,
        app.duration,
        ui_settings.ruler_major_every_secs,
    );
    let pad = " ".repeat(usize::from(NAME_WIDTH));
    let ruler = Paragraph::new(vec![
        Line::from(format!("{pad}{ticks}")),
        Line::from(format!("{pad}{labels}")),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::bordered().title(" time "));
    frame.render_widget(ruler, regions.ruler);

    // Lanes
    let progress = app.progress();
    let lines: Vec<Line> = app
        .lanes
        .iter()
        .enumerate()
        .map(|(i, lane)| {
            let name_style = if lane.muted {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let bar_style = if lane.muted {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            let name = format!(
                "{:<width$}",
                lane_name(&lane.label, i, lane.muted),
                width = usize::from(NAME_WIDTH)
            );
            Line::from(vec![
                Span::styled(name, name_style),
                Span::styled(
                    lane_bar(regions.lane_tracks.width, progress, lane.muted),
                    bar_style,
                ),
            ])
        })
        .collect();
    let lanes_body = if lines.is_empty() {
        Paragraph::new("no tracks loaded (pass audio files or directories)")
    } else {
        Paragraph::new(lines)
    };
    frame.render_widget(
        lanes_body.block(Block::bordered().title(" tracks ")),
        regions.lanes,
    );

    // Progress
    let time_label = format!(
        " {} / {}",
        format_mmss(app.current_time),
        format_mmss(app.duration)
    );
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            progress_bar_chars(regions.progress_bar.width, progress),
            Style::default().fg(Color::Green),
        ),
        Span::raw(time_label),
    ]))
    .block(Block::bordered().title(" progress "));
    frame.render_widget(bar, regions.progress);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(side_padding),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, regions.footer);
}

#[cfg(test)]
mod tests;
