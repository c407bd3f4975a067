//! Screen regions and mouse hit-testing.
//!
//! Rendering and input both go through [`layout`], so a click always maps to
//! the same cells that were drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

/// Columns reserved for lane names, left of the timeline.
pub const NAME_WIDTH: u16 = 16;
/// Width of the ` MM:SS / MM:SS` label right of the progress bar.
pub const TIME_LABEL_WIDTH: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub status: Rect,
    pub ruler: Rect,
    pub lanes: Rect,
    pub progress: Rect,
    pub footer: Rect,

    /// Ruler cells aligned with the lane timelines.
    pub ruler_scale: Rect,
    pub lane_names: Rect,
    pub lane_tracks: Rect,
    pub progress_bar: Rect,
}

/// What a mouse position points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// The progress bar, at a timeline fraction.
    ProgressBar(f64),
    /// The ruler or a lane timeline, at a timeline fraction.
    Timeline(f64),
    /// The name cell of the n-th lane (0-based, top to bottom).
    LaneName(usize),
    Nothing,
}

fn split_cols(area: Rect, left: u16) -> (Rect, Rect) {
    let left = left.min(area.width);
    (
        Rect {
            width: left,
            ..area
        },
        Rect {
            x: area.x + left,
            width: area.width - left,
            ..area
        },
    )
}

pub fn layout(area: Rect) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let (_, ruler_scale) = split_cols(Block::bordered().inner(chunks[2]), NAME_WIDTH);
    let (lane_names, lane_tracks) = split_cols(Block::bordered().inner(chunks[3]), NAME_WIDTH);

    let progress_inner = Block::bordered().inner(chunks[4]);
    let progress_bar = Rect {
        width: progress_inner.width.saturating_sub(TIME_LABEL_WIDTH),
        ..progress_inner
    };

    Regions {
        header: chunks[0],
        status: chunks[1],
        ruler: chunks[2],
        lanes: chunks[3],
        progress: chunks[4],
        footer: chunks[5],
        ruler_scale,
        lane_names,
        lane_tracks,
        progress_bar,
    }
}

fn within(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Map a column inside `area` to a fraction in `[0, 1]`. The first cell is 0
/// and the last cell is 1.
pub fn column_fraction(column: u16, area: Rect) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x).min(area.width - 1);
    f64::from(offset) / f64::from(area.width - 1)
}

/// The column inside `area` that shows `fraction`.
pub fn fraction_column(fraction: f64, area: Rect) -> Option<u16> {
    if area.width == 0 {
        return None;
    }
    let f = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let offset = (f * f64::from(area.width - 1)).round() as u16;
    Some(area.x + offset)
}

pub fn hit_test(regions: &Regions, column: u16, row: u16) -> Hit {
    if within(regions.progress_bar, column, row) {
        Hit::ProgressBar(column_fraction(column, regions.progress_bar))
    } else if within(regions.ruler_scale, column, row) || within(regions.lane_tracks, column, row)
    {
        // Ruler and lanes share one x range.
        Hit::Timeline(column_fraction(column, regions.lane_tracks))
    } else if within(regions.lane_names, column, row) {
        Hit::LaneName(usize::from(row - regions.lane_names.y))
    } else {
        Hit::Nothing
    }
}
