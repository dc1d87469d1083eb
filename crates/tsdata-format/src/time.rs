//! Timestamp parsing for the time column

use chrono::{DateTime, FixedOffset};
use std::borrow::Cow;

/// Byte offset of the date/time separator in `YYYY-MM-DD?hh:mm:ss`
const SEPARATOR_OFFSET: usize = 10;

/// Parse an RFC 3339 timestamp with an explicit timezone offset
///
/// A single space is accepted in place of `T` between date and time.
/// Fractional seconds are optional. Timestamps without an offset are rejected.
///
/// ```
/// use tsdata_format::parse_timestamp;
///
/// assert!(parse_timestamp("2017-05-06T19:52:57.601Z").is_some());
/// assert!(parse_timestamp("2017-05-06 19:52:57-07:00").is_some());
/// assert!(parse_timestamp("2017-05-06T19:52:57").is_none());
/// assert!(parse_timestamp("NA").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&normalize_separator(value)).ok()
}

fn normalize_separator(value: &str) -> Cow<'_, str> {
    if value.as_bytes().get(SEPARATOR_OFFSET) == Some(&b' ') {
        let (date, rest) = value.split_at(SEPARATOR_OFFSET);
        Cow::Owned(format!("{date}T{}", &rest[1..]))
    } else {
        Cow::Borrowed(value)
    }
}
