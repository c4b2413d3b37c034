//! Monthly attendance summary.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{DailyAttendance, Employee, MonthlySummary, YearMonth};

/// Aggregates daily records into one summary per employee.
///
/// Summaries follow the order of `employees`; an employee without records
/// gets an all-zero summary. When `month` is set, only records dated in that
/// month are counted.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{calculate_attendance_for_date, summarize_month};
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{AttendanceSnapshot, Employee, YearMonth};
/// use chrono::NaiveDate;
///
/// let snapshot = AttendanceSnapshot {
///     employees: vec![Employee::new("EMP001", "Ahmed")],
///     ..AttendanceSnapshot::default()
/// };
/// let monday = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
/// let records = calculate_attendance_for_date(&snapshot, monday, &EngineConfig::default());
///
/// let summaries = summarize_month(&snapshot.employees, &records, Some(YearMonth::new(2025, 12)));
/// assert_eq!(summaries[0].absence_days, 1);
/// ```
pub fn summarize_month(
    employees: &[Employee],
    records: &[DailyAttendance],
    month: Option<YearMonth>,
) -> Vec<MonthlySummary> {
    let mut by_employee: HashMap<&str, Vec<&DailyAttendance>> = HashMap::new();
    for record in records
        .iter()
        .filter(|record| month.is_none_or(|month| month.contains(record.date)))
    {
        by_employee
            .entry(record.employee_code.as_str())
            .or_default()
            .push(record);
    }

    employees
        .iter()
        .map(|employee| {
            let records = by_employee
                .get(employee.code.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            summarize_employee(employee, records)
        })
        .collect()
}

fn summarize_employee(employee: &Employee, records: &[&DailyAttendance]) -> MonthlySummary {
    let mut summary = MonthlySummary {
        employee_code: employee.code.clone(),
        name: employee.name.clone(),
        department: employee.department().unwrap_or_default().to_string(),
        job: employee.job.clone().unwrap_or_default(),
        absence_days: 0,
        late_minutes: 0,
        penalty_days: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        overtime_days: 0,
        total_deductions: Decimal::ZERO,
    };

    for record in records {
        if record.absence_penalty > Decimal::ZERO {
            summary.absence_days += 1;
        }
        if !record.suppress_penalties {
            summary.late_minutes += record.late_minutes();
        }
        summary.penalty_days += record.total_deduction;
        summary.total_deductions += record.total_deduction;
        summary.overtime_hours += record.total_overtime;
        if record.total_overtime > Decimal::ZERO {
            summary.overtime_days += 1;
        }
    }

    summary
}
