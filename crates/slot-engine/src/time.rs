//! Floating local-time strings and millisecond instants.
//!
//! Every window, slot and row timestamp is a wall-clock reading with no zone
//! attached. Instants are that reading interpreted as UTC, in milliseconds,
//! so arithmetic and comparison never depend on the host timezone.
//!
//! Accepted input forms:
//!
//! - `2026-03-16T09:00` and `2026-03-16T09:00:00` (optional fractional seconds)
//! - the same with a single space instead of `T` (SQLite `datetime()` output)
//! - `2026-03-16` (midnight)
//! - RFC 3339 with an offset; the wall-clock reading is kept and the offset dropped
//!
//! Output is always `YYYY-MM-DDTHH:MM`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const MINUTE_MS: i64 = 60 * 1000;
pub const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Output format for slots and normalized window boundaries.
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a floating local-time string. Returns `None` for anything unparsable.
pub fn parse_local(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a floating local-time string straight to milliseconds.
pub fn parse_local_millis(value: &str) -> Option<i64> {
    parse_local(value).map(to_millis)
}

pub fn to_millis(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

pub fn from_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Format as `YYYY-MM-DDTHH:MM`; seconds and below are dropped.
pub fn format_local(dt: NaiveDateTime) -> String {
    dt.format(LOCAL_FORMAT).to_string()
}

pub fn floor_to_minute(ms: i64) -> i64 {
    ms.div_euclid(MINUTE_MS) * MINUTE_MS
}

pub fn ceil_to_minute(ms: i64) -> i64 {
    ceil_to_step(ms, MINUTE_MS)
}

/// Round up to the next multiple of `step_ms` counted from the epoch.
///
/// Because instants are floating local time read as UTC, multiples of any
/// divisor of a day are also aligned to local midnight.
pub fn ceil_to_step(ms: i64, step_ms: i64) -> i64 {
    let rem = ms.rem_euclid(step_ms);
    if rem == 0 {
        ms
    } else {
        (ms - rem).saturating_add(step_ms)
    }
}
