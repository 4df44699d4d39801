use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Relative date range selectable in the widget.
///
/// The set is closed; an unknown token from a request must be replaced
/// with the configured default *before* resolving. The resolver itself
/// has no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeToken {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

/// Inclusive UTC calendar-day window, always ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RangeToken {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }

    /// Number of calendar days the window spans, inclusive.
    pub const fn days(self) -> u64 {
        match self {
            Self::Today => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }

    /// Parse a request-supplied token. Returns `None` for anything outside
    /// the fixed set so the caller can substitute its configured default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "today" => Some(Self::Today),
            "7d" => Some(Self::SevenDays),
            "30d" => Some(Self::ThirtyDays),
            _ => None,
        }
    }

    /// Resolve against the current UTC date.
    pub fn resolve(self) -> DateWindow {
        self.resolve_on(Utc::now().date_naive())
    }

    /// Resolve against an explicit date. An N-day token yields an N-day
    /// inclusive window ending on `today`.
    pub fn resolve_on(self, today: NaiveDate) -> DateWindow {
        let from = today - Days::new(self.days() - 1);
        DateWindow { from, to: today }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_is_single_day() {
        let window = RangeToken::Today.resolve_on(day(2026, 3, 15));
        assert_eq!(window.from, window.to);
        assert_eq!(window.to, day(2026, 3, 15));
    }

    #[test]
    fn test_seven_day_window_spans_seven_days() {
        let window = RangeToken::SevenDays.resolve_on(day(2026, 3, 15));
        assert_eq!(window.from, day(2026, 3, 9));
        assert_eq!(window.to, day(2026, 3, 15));
        assert_eq!((window.to - window.from).num_days(), 6);
    }

    #[test]
    fn test_thirty_day_window_crosses_month_boundary() {
        let window = RangeToken::ThirtyDays.resolve_on(day(2026, 3, 15));
        assert_eq!(window.from, day(2026, 2, 14));
        assert_eq!(window.to, day(2026, 3, 15));
    }

    #[test]
    fn test_all_tokens_ordered() {
        let today = day(2026, 1, 1);
        for token in [
            RangeToken::Today,
            RangeToken::SevenDays,
            RangeToken::ThirtyDays,
        ] {
            let window = token.resolve_on(today);
            assert!(window.from <= window.to);
            let span = (window.to - window.from).num_days() + 1;
            assert_eq!(span, i64::try_from(token.days()).unwrap());
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for token in [
            RangeToken::Today,
            RangeToken::SevenDays,
            RangeToken::ThirtyDays,
        ] {
            assert_eq!(RangeToken::parse(token.as_str()), Some(token));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(RangeToken::parse("90d"), None);
        assert_eq!(RangeToken::parse(""), None);
        assert_eq!(RangeToken::parse("7D"), None);
    }

    #[test]
    fn test_date_format_is_iso() {
        let window = RangeToken::Today.resolve_on(day(2026, 3, 5));
        assert_eq!(window.to.to_string(), "2026-03-05");
    }
}
