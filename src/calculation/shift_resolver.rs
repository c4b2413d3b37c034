//! Effective shift resolution.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::models::clock::truncate_to_minute;
use crate::models::{Employee, ShiftWindow};

use super::effect_resolver::RuleEffect;

/// The employee's own shift, with each missing boundary taken from the
/// configured default shift. Boundaries are truncated to the minute.
pub fn default_shift(employee: &Employee, config: &EngineConfig) -> ShiftWindow {
    ShiftWindow::new(
        truncate_to_minute(employee.shift_start.unwrap_or(config.default_shift.start)),
        truncate_to_minute(employee.shift_end.unwrap_or(config.default_shift.end)),
    )
}

/// Determines the shift window in effect for `employee` on `date`.
///
/// A merged custom shift replaces the default entirely. Without one, the
/// configured shortened day moves the end earlier, but only for employees
/// whose default start is the shortened-day baseline.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{RuleEffect, resolve_shift};
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::Employee;
/// use attendance_engine::models::clock::clock;
/// use chrono::NaiveDate;
///
/// let config = EngineConfig::default();
/// let employee = Employee::new("EMP001", "Ahmed");
/// let saturday = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
///
/// let shift = resolve_shift(&employee, saturday, &RuleEffect::default(), &config);
/// assert_eq!(shift.start, clock(8, 0));
/// assert_eq!(shift.end, clock(14, 0));
/// ```
pub fn resolve_shift(
    employee: &Employee,
    date: NaiveDate,
    effect: &RuleEffect,
    config: &EngineConfig,
) -> ShiftWindow {
    if let Some(custom) = effect.custom_shift {
        return custom;
    }

    let mut shift = default_shift(employee, config);
    let shortened = &config.shortened_day;

    if config.is_shortened_day(date) && shift.start == shortened.baseline_start {
        shift.end = if employee.job_contains(&shortened.auxiliary_job_marker) {
            shortened.auxiliary_end
        } else {
            shortened.standard_end
        };
    }

    shift
}
