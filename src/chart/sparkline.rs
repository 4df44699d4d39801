//! Minimal trend sparkline: a stroked line with a filled area beneath,
//! built from a flat sequence of daily values. Pure string rendering,
//! no state.

use std::fmt::Write;

/// Default sparkline canvas, sized for the widget's summary grid.
pub const SPARK_WIDTH: f64 = 520.0;
pub const SPARK_HEIGHT: f64 = 120.0;

const PAD: f64 = 6.0;

/// Render the sparkline SVG for a value series.
///
/// Fewer than two values renders a flat baseline placeholder rather
/// than failing; a constant series draws as a straight line.
pub fn render(values: &[f64], width: f64, height: f64) -> String {
    if values.len() < 2 {
        return format!(
            concat!(
                r#"<svg class="cabin-sparkline" viewBox="0 0 {w:.0} {h:.0}" role="img" aria-label="Trend sparkline">"#,
                r#"<path d="M {pad:.0} {base:.0} L {right:.0} {base:.0}" fill="none" stroke="currentColor" stroke-width="3" opacity="0.35" />"#,
                "</svg>"
            ),
            w = width,
            h = height,
            pad = PAD,
            base = height - PAD,
            right = width - PAD,
        );
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Constant series: substitute a unit range so every point normalizes
    // to the same height instead of dividing by zero.
    let range = if (max - min) == 0.0 { 1.0 } else { max - min };

    #[allow(clippy::cast_precision_loss)]
    let step = (width - 2.0 * PAD) / (values.len() - 1) as f64;

    let mut polyline = String::with_capacity(values.len() * 14);
    for (i, value) in values.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = PAD + i as f64 * step;
        let norm = (value - min) / range;
        let y = (height - PAD) - norm * (height - 2.0 * PAD);
        if i > 0 {
            polyline.push(' ');
        }
        let _ = write!(polyline, "{x:.2},{y:.2}");
    }

    // Close the polygon along the baseline for the filled area.
    #[allow(clippy::cast_precision_loss)]
    let last_x = PAD + (values.len() - 1) as f64 * step;
    let area = format!(
        "{polyline} {last_x:.2},{base:.2} {pad:.2},{base:.2}",
        base = height - PAD,
        pad = PAD,
    );

    format!(
        concat!(
            r#"<svg class="cabin-sparkline" viewBox="0 0 {w:.0} {h:.0}" role="img" aria-label="Trend sparkline">"#,
            r#"<polygon points="{area}" fill="currentColor" opacity="0.10"></polygon>"#,
            r#"<polyline points="{polyline}" fill="none" stroke="currentColor" stroke-width="3" stroke-linecap="round" stroke-linejoin="round"></polyline>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        area = area,
        polyline = polyline,
    )
}
