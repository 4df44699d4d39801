use serde::Serialize;
use serde_json::Value;

/// Headline totals for the selected range.
///
/// Every field is optional: the upstream contract does not guarantee
/// presence, and a non-numeric value is treated as absent rather than
/// failing the decode.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrafficSummary {
    pub page_views: Option<f64>,
    pub unique_visitors: Option<f64>,
    pub bounces: Option<f64>,
    /// Provider-supplied pre-aggregated rate. Units are ambiguous upstream:
    /// observed both as a [0,1] fraction and as a percent. The derivation
    /// layer applies the interval heuristic, and prefers raw counts.
    pub bounce_rate: Option<f64>,
}

/// One day of traffic as received. Rows lacking a positive timestamp or
/// either count are dropped when the chart consumes them; the sparkline
/// only requires `page_views`.
#[derive(Debug, Clone, Serialize)]
pub struct DailyRecord {
    pub timestamp_ms: Option<i64>,
    pub page_views: Option<f64>,
    pub unique_visitors: Option<f64>,
}

/// Decoded upstream response. Immutable once constructed; cached and
/// returned by value, never shared across requests.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsPayload {
    pub summary: TrafficSummary,
    pub daily_data: Vec<DailyRecord>,
}

impl AnalyticsPayload {
    /// Extract a payload from a decoded JSON body.
    ///
    /// Returns `None` only when the body is not an object. Within an
    /// object every field is read defensively: missing or mistyped
    /// values degrade to `None`, non-object daily rows are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let summary = obj.get("summary").map_or_else(TrafficSummary::default, |s| TrafficSummary {
            page_views: field_number(s, "page_views"),
            unique_visitors: field_number(s, "unique_visitors"),
            bounces: field_number(s, "bounces"),
            bounce_rate: field_number(s, "bounce_rate"),
        });

        let daily_data = obj
            .get("daily_data")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.is_object())
                    .map(|row| DailyRecord {
                        timestamp_ms: field_integer(row, "timestamp"),
                        page_views: field_number(row, "page_views"),
                        unique_visitors: field_number(row, "unique_visitors"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            summary,
            daily_data,
        })
    }

    /// Daily page-view values in received order, for the sparkline.
    /// Rows without a numeric `page_views` are skipped.
    pub fn page_view_series(&self) -> Vec<f64> {
        self.daily_data
            .iter()
            .filter_map(|row| row.page_views)
            .collect()
    }
}

fn field_number(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

#[allow(clippy::cast_possible_truncation)]
fn field_integer(value: &Value, key: &str) -> Option<i64> {
    let v = value.get(key)?;
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}
