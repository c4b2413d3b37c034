//! Overtime calculation.
//!
//! This module computes early overtime (checking in before shift start),
//! late overtime (checking out after shift end), and overnight overtime,
//! where the shift is closed by the employee's first punch of the next day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::clock::format_clock;
use crate::models::{OvertimeEntry, OvertimeKind, ShiftWindow};

use super::effect_resolver::RuleEffect;

/// The overtime computed for one day, in hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OvertimeResult {
    /// Overtime before shift start.
    pub early_overtime: Decimal,
    /// Overtime after shift end, or overnight overtime.
    pub late_overtime: Decimal,
    /// Sum of early and late overtime.
    pub total_overtime: Decimal,
    /// Audit entries.
    pub entries: Vec<OvertimeEntry>,
}

/// Converts whole minutes to hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Computes the day's overtime.
///
/// Nothing is credited unless both stamps exist and differ and penalties are
/// not suppressed. With an overnight effect that allows next-day checkout,
/// `next_day_first_punch` is linked to the shift end: a positive gap within
/// the cap replaces the ordinary late overtime.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{RuleEffect, calculate_overtime};
/// use attendance_engine::models::ShiftWindow;
/// use attendance_engine::models::clock::clock;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
/// let shift = ShiftWindow::new(clock(8, 0), clock(16, 0));
/// let result = calculate_overtime(
///     date,
///     Some(clock(7, 30)),
///     Some(clock(17, 0)),
///     &shift,
///     false,
///     &RuleEffect::default(),
///     None,
/// );
///
/// assert_eq!(result.early_overtime, Decimal::new(5, 1));
/// assert_eq!(result.late_overtime, Decimal::ONE);
/// assert_eq!(result.total_overtime, Decimal::new(15, 1));
/// ```
pub fn calculate_overtime(
    date: NaiveDate,
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
    shift: &ShiftWindow,
    suppressed: bool,
    effect: &RuleEffect,
    next_day_first_punch: Option<NaiveDateTime>,
) -> OvertimeResult {
    let mut result = OvertimeResult::default();

    let (check_in, check_out) = match (check_in, check_out) {
        (Some(check_in), Some(check_out)) if check_in != check_out && !suppressed => {
            (check_in, check_out)
        }
        _ => return result,
    };

    let early_minutes = (shift.start - check_in).num_minutes();
    if early_minutes > 0 {
        result.early_overtime = minutes_to_hours(early_minutes);
        result.entries.push(OvertimeEntry {
            kind: OvertimeKind::Early,
            minutes: early_minutes,
            reason: "Before shift start".to_string(),
        });
    }

    let overnight = effect
        .overnight_overtime
        .filter(|overnight| overnight.allow_next_day_checkout)
        .and_then(|overnight| {
            let punch = next_day_first_punch?;
            let elapsed = (punch - date.and_time(shift.end)).num_minutes();
            (elapsed > 0 && Decimal::from(elapsed) <= overnight.max_minutes())
                .then_some((punch, elapsed))
        });

    if let Some((punch, elapsed)) = overnight {
        result.late_overtime = minutes_to_hours(elapsed);
        result.entries.push(OvertimeEntry {
            kind: OvertimeKind::Overnight,
            minutes: elapsed,
            reason: format!(
                "Linked to next day punch at {}",
                format_clock(punch.time())
            ),
        });
    } else {
        let late_minutes = (check_out - shift.end).num_minutes();
        if late_minutes > 0 {
            result.late_overtime = minutes_to_hours(late_minutes);
            result.entries.push(OvertimeEntry {
                kind: OvertimeKind::Late,
                minutes: late_minutes,
                reason: "After shift end".to_string(),
            });
        }
    }

    result.total_overtime = result.early_overtime + result.late_overtime;
    result
}
