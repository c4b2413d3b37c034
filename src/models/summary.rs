//! Monthly summary models.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    /// The year.
    pub year: i32,
    /// The month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a month value.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Returns true if `date` falls within this month.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::YearMonth;
    /// use chrono::NaiveDate;
    ///
    /// let december = YearMonth::new(2025, 12);
    /// assert!(december.contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    /// assert!(!december.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Per-employee totals over a month of daily records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The employee code.
    pub employee_code: String,
    /// The employee name.
    pub name: String,
    /// The employee department, blank when unset.
    pub department: String,
    /// The employee job title, blank when unset.
    pub job: String,
    /// Days with an absence penalty.
    pub absence_days: u32,
    /// Total minutes arrived late on days where penalties applied.
    pub late_minutes: i64,
    /// Total deduction expressed in days.
    pub penalty_days: Decimal,
    /// Total overtime hours.
    pub overtime_hours: Decimal,
    /// Days with any overtime.
    pub overtime_days: u32,
    /// Total deduction.
    pub total_deductions: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_of_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(YearMonth::of(date), YearMonth::new(2026, 2));
    }

    #[test]
    fn test_year_month_display_is_zero_padded() {
        assert_eq!(YearMonth::new(2026, 3).to_string(), "2026-03");
    }

    #[test]
    fn test_year_month_ordering() {
        assert!(YearMonth::new(2025, 12) < YearMonth::new(2026, 1));
    }
}
