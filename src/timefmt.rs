//! Timestamp parsing and formatting.
//!
//! Selection bounds and pick files share one textual representation of time.
//! Timestamps are naive UTC instants with nanosecond resolution. Output always
//! uses ISO-8601 with as many fractional digits as needed, so a formatted
//! timestamp parses back to the identical instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Format used when writing timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp from text.
///
/// Accepts ISO-8601 date-times (`T` or space separated, optional fraction),
/// RFC 3339 strings with an offset (converted to UTC), bare dates and integer
/// epoch milliseconds. Returns `None` for anything else, including empty text.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in PARSE_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return Some(timestamp);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.naive_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(millis) = text.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis).map(|t| t.naive_utc());
    }
    None
}

/// Format a timestamp for persistence
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Convert a span in seconds to a duration rounded to the nanosecond
pub fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::nanoseconds((seconds * 1e9).round() as i64)
}

/// Convert a duration to seconds
pub fn duration_to_seconds(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 * 1e-9,
        None => duration.num_milliseconds() as f64 * 1e-3,
    }
}
