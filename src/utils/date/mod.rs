// Date utility functions
// Parsing of canonical/input timestamps and tooltip display formatting

use crate::error::{Result, WidgetError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Formats accepted for timestamps without an explicit offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Offset-aware values are normalized to UTC; naive values are taken as-is.
/// A bare date is interpreted as midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| WidgetError::InvalidTimestamp(value.to_string()))
}

/// ISO string as produced by a browser `toISOString()` call.
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical string for a value entered in a datetime input.
pub fn to_canonical(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Whether a stored timestamp carries an explicit offset (`Z` or `+hh:mm`).
pub fn has_offset(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value.trim()).is_ok()
}

/// Serialize an edited value in the frame of the value it replaces.
///
/// Offset-aware values are edited as UTC wall-clock time and written back as
/// UTC ISO; naive values stay naive.
pub fn to_stored_frame(stored: &str, dt: NaiveDateTime) -> String {
    if has_offset(stored) {
        to_iso(Utc.from_utc_datetime(&dt))
    } else {
        to_canonical(dt)
    }
}

/// Value for a `datetime-local` input.
pub fn to_input_value(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// Tooltip display format: numeric month/day/year and 2-digit hour:minute.
pub fn format_display(dt: NaiveDateTime) -> String {
    dt.format("%-m/%-d/%Y, %I:%M %p").to_string()
}

/// Display a raw timestamp, falling back to the raw text when unparseable.
pub fn display_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Ok(dt) => format_display(dt),
        Err(_) => value.to_string(),
    }
}
