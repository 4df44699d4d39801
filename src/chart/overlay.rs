//! Pointer-interaction overlay for the stacked chart.
//!
//! Each bar's pixel rectangle becomes a percentage-of-canvas hit region
//! so the host page can position tooltip targets over a responsively
//! scaled SVG. Regions carry a stable anchor id that keys into the
//! detail entries; no chart math happens at interaction time.

use crate::chart::format::{grouped_number, long_date};
use crate::chart::geometry::{ChartLayout, ChartPoint, CHART_HEIGHT, CHART_WIDTH};
use serde::Serialize;

/// Minimum hit-region height as a percentage of canvas height. Regions
/// thinner than this are expanded symmetrically around their vertical
/// center; the rendered bar is left untouched.
pub const MIN_HIT_HEIGHT_PCT: f64 = 2.0;

/// Percent-positioned pointer target for one bar.
#[derive(Debug, Clone, Serialize)]
pub struct HitRegion {
    /// Stable per-point identifier, shared with the matching detail entry.
    pub anchor: String,
    pub x_pct: f64,
    pub y_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Precomputed tooltip content, addressed by anchor.
#[derive(Debug, Clone, Serialize)]
pub struct DetailEntry {
    pub anchor: String,
    pub date: String,
    pub views: String,
    pub visitors: String,
}

/// Build the hit regions and detail entries for a laid-out chart.
pub fn hit_regions(points: &[ChartPoint], layout: &ChartLayout) -> (Vec<HitRegion>, Vec<DetailEntry>) {
    let mut regions = Vec::with_capacity(points.len());
    let mut details = Vec::with_capacity(points.len());

    for (point, bar) in points.iter().zip(&layout.bars) {
        let anchor = format!("day-{}", point.timestamp_ms);

        let x_pct = bar.x / CHART_WIDTH * 100.0;
        let width_pct = bar.width / CHART_WIDTH * 100.0;
        let mut y_pct = bar.stack_top() / CHART_HEIGHT * 100.0;
        let mut height_pct = bar.stack_height() / CHART_HEIGHT * 100.0;

        if height_pct < MIN_HIT_HEIGHT_PCT {
            let center = y_pct + height_pct / 2.0;
            height_pct = MIN_HIT_HEIGHT_PCT;
            y_pct = center - MIN_HIT_HEIGHT_PCT / 2.0;
        }

        regions.push(HitRegion {
            anchor: anchor.clone(),
            x_pct,
            y_pct,
            width_pct,
            height_pct,
        });
        details.push(DetailEntry {
            anchor,
            date: long_date(point.timestamp_ms),
            views: grouped_number(point.views),
            visitors: grouped_number(point.uniq),
        });
    }

    (regions, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::geometry::{clean_points, layout};
    use crate::fetch::payload::DailyRecord;

    const DAY_MS: i64 = 86_400_000;
    const EPOCH_2026: i64 = 1_767_225_600_000;

    fn build(days: &[(f64, f64)]) -> (Vec<ChartPoint>, ChartLayout) {
        let daily: Vec<DailyRecord> = days
            .iter()
            .enumerate()
            .map(|(i, &(views, uniq))| DailyRecord {
                timestamp_ms: Some(EPOCH_2026 + i as i64 * DAY_MS),
                page_views: Some(views),
                unique_visitors: Some(uniq),
            })
            .collect();
        let points = clean_points(&daily);
        let chart = layout(&points).unwrap();
        (points, chart)
    }

    #[test]
    fn test_region_per_point_with_matching_anchors() {
        let (points, chart) = build(&[(100.0, 40.0), (150.0, 60.0), (90.0, 30.0)]);
        let (regions, details) = hit_regions(&points, &chart);
        assert_eq!(regions.len(), 3);
        assert_eq!(details.len(), 3);
        for (region, detail) in regions.iter().zip(&details) {
            assert_eq!(region.anchor, detail.anchor);
        }
        assert_eq!(regions[0].anchor, format!("day-{EPOCH_2026}"));
        assert_eq!(
            regions[1].anchor,
            format!("day-{}", EPOCH_2026 + DAY_MS)
        );
    }

    #[test]
    fn test_percent_round_trip_reproduces_pixels() {
        let (points, chart) = build(&[(100.0, 40.0), (150.0, 60.0), (37.0, 12.0)]);
        let (regions, _) = hit_regions(&points, &chart);

        for (region, bar) in regions.iter().zip(&chart.bars) {
            let x = region.x_pct / 100.0 * crate::chart::geometry::CHART_WIDTH;
            let y = region.y_pct / 100.0 * crate::chart::geometry::CHART_HEIGHT;
            let w = region.width_pct / 100.0 * crate::chart::geometry::CHART_WIDTH;
            let h = region.height_pct / 100.0 * crate::chart::geometry::CHART_HEIGHT;
            assert!((x - bar.x).abs() < 1e-6);
            assert!((w - bar.width).abs() < 1e-6);
            assert!((y - bar.stack_top()).abs() < 1e-6);
            assert!((h - bar.stack_height()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_thin_region_expanded_around_center() {
        // Second day is tiny next to the first → sub-2% stack height.
        let (points, chart) = build(&[(10_000.0, 4000.0), (3.0, 1.0)]);
        let (regions, _) = hit_regions(&points, &chart);

        let bar = &chart.bars[1];
        let raw_y_pct = bar.stack_top() / CHART_HEIGHT * 100.0;
        let raw_h_pct = bar.stack_height() / CHART_HEIGHT * 100.0;
        assert!(raw_h_pct < MIN_HIT_HEIGHT_PCT);

        let region = &regions[1];
        assert_eq!(region.height_pct, MIN_HIT_HEIGHT_PCT);
        // Expansion is symmetric: centers coincide.
        let raw_center = raw_y_pct + raw_h_pct / 2.0;
        let center = region.y_pct + region.height_pct / 2.0;
        assert!((center - raw_center).abs() < 1e-9);
    }

    #[test]
    fn test_tall_region_untouched() {
        let (points, chart) = build(&[(100.0, 40.0), (150.0, 60.0)]);
        let (regions, _) = hit_regions(&points, &chart);
        let bar = &chart.bars[1];
        let region = &regions[1];
        assert!((region.height_pct - bar.stack_height() / CHART_HEIGHT * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_detail_values_formatted() {
        let (points, chart) = build(&[(1234.0, 567.0), (150.0, 60.0)]);
        let (_, details) = hit_regions(&points, &chart);
        assert_eq!(details[0].date, "Jan 1, 2026");
        assert_eq!(details[0].views, "1,234");
        assert_eq!(details[0].visitors, "567");
    }
}
