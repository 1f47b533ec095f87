use chrono::{DateTime, Duration, Months, NaiveDate, SecondsFormat, Utc};

/// Maximum number of events requested from the listing endpoint in one call
pub const MAX_EVENTS: u32 = 100;

/// Resolved time window and result cap for one listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow {
    /// Inclusive lower bound, UTC marker format
    pub time_min: String,
    /// Upper bound, UTC marker format; None means open-ended
    pub time_max: Option<String>,
    pub max_results: u32,
}

impl EventWindow {
    /// Window for the nearest upcoming events: [now, +inf)
    pub fn upcoming(now: DateTime<Utc>, count: u32) -> Self {
        Self {
            time_min: utc_marker(now),
            time_max: None,
            max_results: count,
        }
    }

    /// Window for the recent past: [now - 1 calendar month, now]
    pub fn trailing_month(now: DateTime<Utc>, count: u32) -> Self {
        let month_ago = now
            .checked_sub_months(Months::new(1))
            .unwrap_or(now);
        Self {
            time_min: utc_marker(month_ago),
            time_max: Some(utc_marker(now)),
            max_results: count,
        }
    }

    /// Window covering exactly one day: [midnight, midnight + 1 day)
    pub fn single_day(date: NaiveDate) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
        Self {
            time_min: utc_marker(midnight),
            time_max: Some(utc_marker(midnight + Duration::days(1))),
            max_results: MAX_EVENTS,
        }
    }

    /// Window for an explicit date pair, bounded by each date's midnight
    pub fn date_pair(start: NaiveDate, end: NaiveDate) -> Self {
        let start = start.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
        let end = end.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
        Self {
            time_min: utc_marker(start),
            time_max: Some(utc_marker(end)),
            max_results: MAX_EVENTS,
        }
    }
}

/// Render an instant in the exact format the listing endpoint is handed:
/// microsecond ISO-8601 with the offset suffix truncated and a literal UTC
/// marker appended
fn utc_marker(instant: DateTime<Utc>) -> String {
    truncate_offset(&instant.to_rfc3339_opts(SecondsFormat::Micros, false))
}

/// Drop the last 7 characters of an ISO-8601 timestamp (the timezone-offset
/// portion) and append a literal 'Z'. The off-by-one bite into the fractional
/// seconds is part of the contract, do not "fix" it.
pub fn truncate_offset(iso: &str) -> String {
    let kept: String = iso.chars().take(iso.chars().count().saturating_sub(7)).collect();
    format!("{}Z", kept)
}
