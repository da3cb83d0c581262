//! Parsing timestamps out of item names.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse `text` with a `strftime` format into seconds since the Unix epoch.
///
/// Formats with an offset (`%z`) are honoured; naive date-times are taken
/// as UTC and date-only formats as midnight UTC. The whole text must match.
pub fn parse_time(text: &str, format: &str) -> Option<i64> {
    if let Ok(stamped) = DateTime::parse_from_str(text, format) {
        return Some(stamped.timestamp());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
        return Some(naive.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(text, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}
