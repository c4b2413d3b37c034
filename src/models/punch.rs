//! Biometric punch model.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::clock::truncate_to_minute;

/// A single biometric clock event.
///
/// Punches carry no in/out direction; the first and last punch of a day are
/// taken as check-in and check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The employee the punch belongs to.
    pub employee_code: String,
    /// When the punch was recorded.
    pub timestamp: NaiveDateTime,
    /// The raw cell value the punch was imported from.
    #[serde(default)]
    pub original_value: Option<String>,
}

impl Punch {
    /// Creates a punch without an original value.
    pub fn new(employee_code: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            employee_code: employee_code.into(),
            timestamp,
            original_value: None,
        }
    }

    /// The calendar date the punch is bucketed under.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The punch time at minute resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Punch;
    /// use chrono::{NaiveDateTime, NaiveTime};
    ///
    /// let punch = Punch::new(
    ///     "EMP001",
    ///     NaiveDateTime::parse_from_str("2025-12-15 08:05:42", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// );
    /// assert_eq!(punch.clock_time(), NaiveTime::from_hms_opt(8, 5, 0).unwrap());
    /// ```
    pub fn clock_time(&self) -> NaiveTime {
        truncate_to_minute(self.timestamp.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_punch_date_bucket() {
        let punch = Punch::new("EMP001", make_datetime("2025-12-15", "23:59:00"));
        assert_eq!(punch.date(), NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn test_punch_deserialization() {
        let json = r#"{
            "employee_code": "EMP001",
            "timestamp": "2025-12-15T08:05:00",
            "original_value": "15/12/2025 08:05"
        }"#;

        let punch: Punch = serde_json::from_str(json).unwrap();
        assert_eq!(punch.timestamp, make_datetime("2025-12-15", "08:05:00"));
        assert_eq!(punch.original_value.as_deref(), Some("15/12/2025 08:05"));
    }

    #[test]
    fn test_punch_without_original_value() {
        let json = r#"{"employee_code": "EMP001", "timestamp": "2025-12-15T16:30:00"}"#;

        let punch: Punch = serde_json::from_str(json).unwrap();
        assert!(punch.original_value.is_none());
    }
}
