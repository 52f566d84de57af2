//! Calendar and clock parsing.
//!
//! Form input and persisted records spell dates and times in several ways:
//! plain `yyyy-MM-dd` dates, `HH:mm` clock times, full ISO-8601 instants
//! (with or without offset), and epoch milliseconds. These helpers reduce
//! all of them to `chrono` naive values.
//!
//! # Time Model
//! Instants are wall-clock `NaiveDateTime`s. An RFC 3339 value keeps the
//! local components of its own offset rather than being shifted to UTC, so
//! `2024-03-01T09:00:00+09:00` is 09:00 on March 1st. Day comparisons go
//! through [`day_key`] to avoid mixing offsets.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const CLOCK_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S%.f", "%I:%M %p", "%I:%M%p"];

/// Parses a full date-time instant.
///
/// Accepts RFC 3339 (offset kept as wall clock) and offset-less ISO forms.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parses a calendar day from a plain date or a full instant.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| parse_instant(s).map(|dt| dt.date()))
}

/// Parses a time of day, keeping only hour and minute.
///
/// A full instant is accepted too; its date part is ignored.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let time = CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_instant(s).map(|dt| dt.time()))?;
    truncate_to_minute(time)
}

/// Builds an instant from a date's year/month/day and a time's hour/minute.
///
/// Seconds are zeroed. Returns `None` if either side fails to parse.
pub fn combine_date_and_time(date: &str, time_of_day: &str) -> Option<NaiveDateTime> {
    let day = parse_date(date)?;
    let clock = parse_time_of_day(time_of_day)?;
    Some(day.and_time(clock))
}

/// [`parse_instant`] over a JSON value; integers are epoch milliseconds (UTC).
pub fn instant_from_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_instant(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// [`combine_date_and_time`] over JSON values.
pub fn combine_values(date: &Value, time_of_day: &Value) -> Option<NaiveDateTime> {
    let day = match date {
        Value::String(s) => parse_date(s)?,
        other => instant_from_value(other)?.date(),
    };
    let clock = match time_of_day {
        Value::String(s) => parse_time_of_day(s)?,
        other => truncate_to_minute(instant_from_value(other)?.time())?,
    };
    Some(day.and_time(clock))
}

/// Normalized `yyyy-MM-dd` key used for same-day comparison.
pub fn day_key(instant: &NaiveDateTime) -> String {
    instant.format(DATE_FORMAT).to_string()
}

fn truncate_to_minute(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}
