//! Mission and leave models.
//!
//! Both are date-scoped adjustments to a day's raw punches: a mission can
//! stand in for missing stamps, a leave suppresses penalties for every date
//! in its range.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::clock::{format_clock, hhmm_option};

/// An off-site assignment on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// The employee on the mission.
    pub employee_code: String,
    /// The mission date.
    pub date: NaiveDate,
    /// When the mission started, if known.
    #[serde(default, with = "hhmm_option")]
    pub start_time: Option<NaiveTime>,
    /// When the mission ended, if known.
    #[serde(default, with = "hhmm_option")]
    pub end_time: Option<NaiveTime>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Mission {
    /// Human-readable summary used in audit traces.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Mission;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let mission = Mission {
    ///     employee_code: "EMP001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 12, 16).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     end_time: NaiveTime::from_hms_opt(14, 0, 0),
    ///     description: Some("Site visit".to_string()),
    /// };
    /// assert_eq!(mission.summary(), "09:00-14:00: Site visit");
    /// ```
    pub fn summary(&self) -> String {
        let start = self.start_time.map(format_clock).unwrap_or_else(|| "?".to_string());
        let end = self.end_time.map(format_clock).unwrap_or_else(|| "?".to_string());
        format!(
            "{}-{}: {}",
            start,
            end,
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// An approved absence over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// The employee on leave.
    pub employee_code: String,
    /// First day of the leave.
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive).
    pub end_date: NaiveDate,
    /// Leave type, e.g. casual, sick or annual.
    #[serde(rename = "type")]
    pub leave_type: String,
    /// Free-text details.
    #[serde(default)]
    pub details: Option<String>,
}

impl Leave {
    /// Returns true if `date` falls within the leave.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every date the leave covers, in order. Empty when the range is inverted.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= end)
    }

    /// Human-readable summary used in audit traces.
    pub fn summary(&self) -> String {
        format!("{}: {} - {}", self.leave_type, self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn leave(start: &str, end: &str) -> Leave {
        Leave {
            employee_code: "EMP001".to_string(),
            start_date: make_date(start),
            end_date: make_date(end),
            leave_type: "اجازة عارضة".to_string(),
            details: None,
        }
    }

    #[test]
    fn test_leave_covers_inclusive_range() {
        let leave = leave("2025-12-20", "2025-12-22");
        assert!(!leave.covers(make_date("2025-12-19")));
        assert!(leave.covers(make_date("2025-12-20")));
        assert!(leave.covers(make_date("2025-12-22")));
        assert!(!leave.covers(make_date("2025-12-23")));
    }

    #[test]
    fn test_leave_dates_spans_month_end() {
        let dates: Vec<NaiveDate> = leave("2025-12-30", "2026-01-02").dates().collect();
        assert_eq!(
            dates,
            vec![
                make_date("2025-12-30"),
                make_date("2025-12-31"),
                make_date("2026-01-01"),
                make_date("2026-01-02"),
            ]
        );
    }

    #[test]
    fn test_inverted_leave_has_no_dates() {
        assert_eq!(leave("2025-12-22", "2025-12-20").dates().count(), 0);
    }

    #[test]
    fn test_leave_summary() {
        assert_eq!(
            leave("2025-12-20", "2025-12-22").summary(),
            "اجازة عارضة: 2025-12-20 - 2025-12-22"
        );
    }

    #[test]
    fn test_leave_type_uses_type_key() {
        let json = r#"{
            "employee_code": "EMP001",
            "start_date": "2025-12-20",
            "end_date": "2025-12-22",
            "type": "Sick"
        }"#;

        let leave: Leave = serde_json::from_str(json).unwrap();
        assert_eq!(leave.leave_type, "Sick");
        assert!(leave.details.is_none());
    }

    #[test]
    fn test_mission_without_times() {
        let json = r#"{"employee_code": "EMP001", "date": "2025-12-16", "start_time": ""}"#;

        let mission: Mission = serde_json::from_str(json).unwrap();
        assert!(mission.start_time.is_none());
        assert!(mission.end_time.is_none());
        assert_eq!(mission.summary(), "?-?: ");
    }
}
