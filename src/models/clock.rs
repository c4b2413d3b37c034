//! Wall-clock time helpers.
//!
//! Shift boundaries and resolved stamps travel as `HH:MM` strings, while
//! chrono's default serde format for [`NaiveTime`] is `HH:MM:SS`. The
//! [`hhmm`] and [`hhmm_option`] modules plug into `#[serde(with = ...)]` to
//! keep the minute-resolution format on the wire.

use chrono::{NaiveTime, Timelike};

/// Format used when writing clock times.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Parses a clock time written as `HH:MM` or `HH:MM:SS`.
///
/// Returns `None` for anything else, including the empty string.
///
/// # Example
///
/// ```
/// use attendance_engine::models::clock::parse_clock;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
/// assert_eq!(parse_clock("16:05:59"), NaiveTime::from_hms_opt(16, 5, 59));
/// assert_eq!(parse_clock("late"), None);
/// ```
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Formats a clock time as `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Builds a clock time from hour and minute, falling back to midnight when
/// the components are out of range.
pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Serde adapter for a required `HH:MM` field.
///
/// Seconds are accepted on input and dropped, so a value reads back
/// unchanged after being written.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{format_clock, parse_clock, truncate_to_minute};

    /// Writes the time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_clock(*time))
    }

    /// Reads `HH:MM` or `HH:MM:SS`, truncated to the minute.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock(&raw)
            .map(truncate_to_minute)
            .ok_or_else(|| D::Error::custom(format!("invalid clock time '{raw}', expected HH:MM")))
    }
}

/// Serde adapter for an optional `HH:MM` field.
///
/// Blank strings read as `None`, since spreadsheet exports use them for empty
/// cells. Pair with `#[serde(default)]` so a missing field also reads as
/// `None`. Seconds are dropped like in [`hhmm`](super::hhmm).
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{format_clock, parse_clock, truncate_to_minute};

    /// Writes `Some` as `HH:MM` and `None` as null.
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&format_clock(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// Reads null, blank, `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_clock(&raw)
                .map(|time| Some(truncate_to_minute(time)))
                .ok_or_else(|| {
                    D::Error::custom(format!("invalid clock time '{raw}', expected HH:MM"))
                }),
        }
    }
}
