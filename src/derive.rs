//! Headline ratio derivation from the upstream summary.
//!
//! This layer never errors: absent or invalid inputs degrade to `None`,
//! which the presentation layer renders as a placeholder.

use crate::fetch::payload::TrafficSummary;
use serde::Serialize;

/// Derived headline metrics for the widget's summary cards.
#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    pub page_views: Option<u64>,
    pub unique_visitors: Option<u64>,
    pub unique_visitor_percent: Option<f64>,
    pub bounce_rate_percent: Option<u8>,
}

/// Compute all headline values from one summary record.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn headline(summary: &TrafficSummary) -> Headline {
    Headline {
        page_views: summary.page_views.map(|v| v.max(0.0).round() as u64),
        unique_visitors: summary.unique_visitors.map(|v| v.max(0.0).round() as u64),
        unique_visitor_percent: unique_visitor_percent(summary),
        bounce_rate_percent: bounce_rate_percent(summary),
    }
}

/// Share of page views made by unique visitors, as a percentage.
/// `None` unless both counts are present and page views is positive.
pub fn unique_visitor_percent(summary: &TrafficSummary) -> Option<f64> {
    match (summary.unique_visitors, summary.page_views) {
        (Some(uniq), Some(views)) if views > 0.0 => Some(uniq / views * 100.0),
        _ => None,
    }
}

/// Bounce rate as an integer percentage in `[0, 100]`, or `None`.
///
/// Raw counts take precedence over the provider's pre-aggregated rate:
/// a ratio derived from `bounces / unique_visitors` is reproducible,
/// the upstream field is not. The fallback treats a raw rate in (1, 100]
/// as already a percent and a rate in [0, 1] as a fraction; anything
/// outside both intervals is discarded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bounce_rate_percent(summary: &TrafficSummary) -> Option<u8> {
    if let (Some(uniq), Some(bounces)) = (summary.unique_visitors, summary.bounces) {
        if uniq > 0.0 && bounces >= 0.0 {
            let rate = (bounces / uniq).clamp(0.0, 1.0);
            // f64::round is round-half-away-from-zero.
            return Some((rate * 100.0).round() as u8);
        }
    }

    let raw = summary.bounce_rate?;
    if raw > 1.0 && raw <= 100.0 {
        Some(raw.round() as u8)
    } else if (0.0..=1.0).contains(&raw) {
        Some((raw * 100.0).round() as u8)
    } else {
        None
    }
}
