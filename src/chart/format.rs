//! Number and date formatting shared by the renderers and the overlay.

use chrono::{TimeZone, Utc};

/// Compact axis notation: 1_500_000 → "1.5M", 2_300 → "2.3K", 875 → "875".
pub fn compact_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{n:.0}")
    }
}

/// Thousands-grouped integer for tooltips and metric values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grouped_number(n: f64) -> String {
    let digits = (n.max(0.0).round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Long date label for tooltips: "Mar 5, 2026".
pub fn long_date(timestamp_ms: i64) -> String {
    format_date(timestamp_ms, "%b %-d, %Y")
}

/// Short x-axis label: "Mar 5".
pub fn short_date(timestamp_ms: i64) -> String {
    format_date(timestamp_ms, "%b %-d")
}

fn format_date(timestamp_ms: i64, fmt: &str) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| "—".to_string(), |dt| dt.format(fmt).to_string())
}
