//! Stacked views/visitors bar chart renderer.
//!
//! Dark base segment = unique visitors, light cap = page views minus
//! unique visitors. Every day carries a `<title>` for zero-JS hover
//! text; interactive tooltips use the overlay module instead.

use crate::chart::format::{compact_number, grouped_number, long_date, short_date};
use crate::chart::geometry::{
    ChartLayout, ChartPoint, CHART_HEIGHT, CHART_WIDTH, PAD_BOTTOM, PAD_LEFT, PAD_RIGHT, PAD_TOP,
};
use std::fmt::Write;

/// Render the stacked chart SVG for a laid-out point list.
///
/// `points` and `layout.bars` must be parallel; callers get both from
/// `clean_points` followed by `layout`.
pub fn render(points: &[ChartPoint], layout: &ChartLayout) -> String {
    let inner_h = CHART_HEIGHT - PAD_TOP - PAD_BOTTOM;
    let mut svg = String::with_capacity(4096);

    let _ = write!(
        svg,
        r#"<svg class="cabin-vv-chart" viewBox="0 0 {CHART_WIDTH:.0} {CHART_HEIGHT:.0}" role="img" aria-label="Views and visitors per day">"#
    );

    svg.push_str(r#"<g class="grid">"#);
    for line in &layout.grid {
        let _ = write!(
            svg,
            r#"<line x1="{PAD_LEFT:.0}" y1="{y:.0}" x2="{x2:.0}" y2="{y:.0}" />"#,
            y = line.y,
            x2 = CHART_WIDTH - PAD_RIGHT,
        );
        let _ = write!(
            svg,
            r#"<text class="ylab" x="{x:.0}" y="{y:.0}" text-anchor="end">{label}</text>"#,
            x = PAD_LEFT - 10.0,
            y = line.y + 4.0,
            label = compact_number(line.value),
        );
    }
    svg.push_str("</g>");

    svg.push_str(r#"<g class="bars">"#);
    for (i, (point, bar)) in points.iter().zip(&layout.bars).enumerate() {
        let title = format!(
            "{} — Views: {}, Visitors: {}",
            long_date(point.timestamp_ms),
            grouped_number(point.views),
            grouped_number(point.uniq),
        );

        svg.push_str(r#"<g class="day">"#);
        let _ = write!(svg, "<title>{title}</title>");

        // Visitors base
        let _ = write!(
            svg,
            r#"<rect class="bar bar--visitors" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="2" />"#,
            x = bar.x,
            y = bar.uniq_y,
            w = bar.width,
            h = bar.uniq_height,
        );

        // Views cap
        if bar.cap_height > 0.0 {
            let _ = write!(
                svg,
                r#"<rect class="bar bar--views-cap" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="2" />"#,
                x = bar.x,
                y = bar.cap_y,
                w = bar.width,
                h = bar.cap_height,
            );
        }

        if i % layout.label_stride == 0 {
            let _ = write!(
                svg,
                r#"<text class="xlab" x="{x:.2}" y="{y:.0}" text-anchor="middle">{label}</text>"#,
                x = bar.x + bar.width / 2.0,
                y = PAD_TOP + inner_h + 32.0,
                label = short_date(point.timestamp_ms),
            );
        }

        svg.push_str("</g>");
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::geometry::{clean_points, layout};
    use crate::fetch::payload::DailyRecord;

    const DAY_MS: i64 = 86_400_000;
    // 2026-01-01 00:00:00 UTC
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
    fn test_svg_structure() {
        let (points, chart) = build(&[(100.0, 40.0), (150.0, 60.0)]);
        let svg = render(&points, &chart);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<g class="grid">"#));
        assert!(svg.contains(r#"<g class="bars">"#));
        assert_eq!(svg.matches(r#"<g class="day">"#).count(), 2);
    }

    #[test]
    fn test_hover_titles_formatted() {
        let (points, chart) = build(&[(1234.0, 567.0), (150.0, 60.0)]);
        let svg = render(&points, &chart);
        assert!(svg.contains("<title>Jan 1, 2026 — Views: 1,234, Visitors: 567</title>"));
    }

    #[test]
    fn test_both_segments_emitted() {
        let (points, chart) = build(&[(100.0, 40.0), (150.0, 60.0)]);
        let svg = render(&points, &chart);
        assert_eq!(svg.matches("bar--visitors").count(), 2);
        assert_eq!(svg.matches("bar--views-cap").count(), 2);
    }

    #[test]
    fn test_zero_cap_segment_omitted() {
        // Every view is a unique visitor on day two → no cap rect.
        let (points, chart) = build(&[(100.0, 40.0), (80.0, 80.0)]);
        let svg = render(&points, &chart);
        assert_eq!(svg.matches("bar--visitors").count(), 2);
        assert_eq!(svg.matches("bar--views-cap").count(), 1);
    }

    #[test]
    fn test_axis_labels_compact() {
        let (points, chart) = build(&[(7300.0, 100.0), (150.0, 60.0)]);
        let svg = render(&points, &chart);
        // ceiling 10K, gridlines at 10K / 7.5K / 5K / 2.5K / 0
        assert!(svg.contains(">10.0K</text>"));
        assert!(svg.contains(">5.0K</text>"));
        assert!(svg.contains(">0</text>"));
    }

    #[test]
    fn test_x_labels_thinned() {
        let days: Vec<(f64, f64)> = (0..30).map(|i| (100.0 + f64::from(i), 40.0)).collect();
        let (points, chart) = build(&days);
        let svg = render(&points, &chart);
        // stride 3 over 30 points → labels at 0, 3, …, 27
        assert_eq!(svg.matches(r#"class="xlab""#).count(), 10);
        assert!(svg.contains(">Jan 1</text>"));
        assert!(svg.contains(">Jan 4</text>"));
        assert!(!svg.contains(">Jan 2</text>"));
    }
}
