//! Pixel layout for the stacked views/visitors chart.
//!
//! All math is pure: a cleaned, time-ordered point list plus the fixed
//! canvas constants produce per-bar rectangles, gridline positions, and
//! the x-label thinning stride. Rectangles are recomputed on every
//! render and never persisted.

use crate::fetch::payload::DailyRecord;

/// Canvas size and padding for the stacked chart, in pixels.
pub const CHART_WIDTH: f64 = 860.0;
pub const CHART_HEIGHT: f64 = 380.0;
pub const PAD_LEFT: f64 = 56.0;
pub const PAD_RIGHT: f64 = 16.0;
pub const PAD_TOP: f64 = 18.0;
pub const PAD_BOTTOM: f64 = 52.0;

/// Horizontal gridline count between zero and the axis ceiling.
pub const GRID_LINES: usize = 4;

const BAR_GAP: f64 = 10.0;
/// Bars never shrink below this width; at high point counts the content
/// overflows the inner width instead. Accepted degradation.
const MIN_BAR_WIDTH: f64 = 10.0;

/// One usable day of traffic after cleaning.
///
/// Invariants: `0 <= uniq <= views` and `uniq + cap == views`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub timestamp_ms: i64,
    pub views: f64,
    pub uniq: f64,
    pub cap: f64,
}

/// Filter raw daily rows down to usable chart points, sorted ascending
/// by timestamp. Rows without a positive timestamp or either count are
/// dropped; unique visitors are clamped into `[0, views]`.
pub fn clean_points(daily: &[DailyRecord]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = daily
        .iter()
        .filter_map(|row| {
            let ts = row.timestamp_ms?;
            let views = row.page_views?;
            let uniq = row.unique_visitors?;
            if ts <= 0 {
                return None;
            }
            let views = views.max(0.0);
            let uniq = uniq.clamp(0.0, views);
            Some(ChartPoint {
                timestamp_ms: ts,
                views,
                uniq,
                cap: views - uniq,
            })
        })
        .collect();
    points.sort_by_key(|p| p.timestamp_ms);
    points
}

/// Smallest 1/2/5 × 10^k value at least as large as `max`, so the top
/// gridline lands on a round number. Degenerate input yields 1.
pub fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let exp = max.log10().floor();
    let base = 10f64.powf(exp);
    let f = max / base;
    if f <= 1.0 {
        base
    } else if f <= 2.0 {
        2.0 * base
    } else if f <= 5.0 {
        5.0 * base
    } else {
        10.0 * base
    }
}

/// Pixel rectangles for one stacked bar: visitors base plus views cap.
#[derive(Debug, Clone, Copy)]
pub struct BarRect {
    pub x: f64,
    pub width: f64,
    pub uniq_y: f64,
    pub uniq_height: f64,
    pub cap_y: f64,
    pub cap_height: f64,
}

impl BarRect {
    /// Top edge of the whole stack.
    pub const fn stack_top(&self) -> f64 {
        self.cap_y
    }

    /// Height of the whole stack.
    pub fn stack_height(&self) -> f64 {
        self.uniq_height + self.cap_height
    }
}

/// One horizontal gridline with its axis value.
#[derive(Debug, Clone, Copy)]
pub struct GridLine {
    pub y: f64,
    pub value: f64,
}

/// Complete chart layout for a point list.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub ceiling: f64,
    pub bar_width: f64,
    pub bars: Vec<BarRect>,
    pub grid: Vec<GridLine>,
    /// Label every Nth bar: 1 for n ≤ 10, 2 for n ≤ 14, 3 above.
    pub label_stride: usize,
}

/// Lay out the stacked chart for cleaned points.
///
/// Returns `None` when fewer than two usable points remain. That is a
/// renderable empty state, not an error.
#[allow(clippy::cast_precision_loss)]
pub fn layout(points: &[ChartPoint]) -> Option<ChartLayout> {
    if points.len() < 2 {
        return None;
    }

    let raw_max = points.iter().map(|p| p.views).fold(0.0f64, f64::max);
    let ceiling = nice_ceiling(raw_max);

    let inner_w = CHART_WIDTH - PAD_LEFT - PAD_RIGHT;
    let inner_h = CHART_HEIGHT - PAD_TOP - PAD_BOTTOM;

    let n = points.len();
    let bar_width = ((inner_w - (n - 1) as f64 * BAR_GAP) / n as f64).max(MIN_BAR_WIDTH);
    let label_stride = if n > 14 {
        3
    } else if n > 10 {
        2
    } else {
        1
    };

    let bars = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PAD_LEFT + i as f64 * (bar_width + BAR_GAP);
            let uniq_height = p.uniq / ceiling * inner_h;
            let cap_height = p.cap / ceiling * inner_h;
            let uniq_y = PAD_TOP + (inner_h - uniq_height);
            let cap_y = uniq_y - cap_height;
            BarRect {
                x,
                width: bar_width,
                uniq_y,
                uniq_height,
                cap_y,
                cap_height,
            }
        })
        .collect();

    let grid = (0..=GRID_LINES)
        .map(|i| {
            let frac = i as f64 / GRID_LINES as f64;
            GridLine {
                y: PAD_TOP + inner_h * frac,
                value: ceiling * (1.0 - frac),
            }
        })
        .collect();

    Some(ChartLayout {
        ceiling,
        bar_width,
        bars,
        grid,
        label_stride,
    })
}
