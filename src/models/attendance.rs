//! Daily attendance record model.
//!
//! One [`DailyAttendance`] is produced per (employee code, date) pair on every
//! calculation run. It carries the resolved stamps and shift window, the
//! penalty and overtime breakdowns, and the audit trace in its `logs`.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::AuditTrace;
use super::clock::{hhmm, hhmm_option};
use crate::error::{EngineError, EngineResult};

/// The computed attendance outcome for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// Surrogate identifier. The engine leaves it empty; the ledger assigns
    /// one and keeps it stable across re-runs for the same key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// The employee the record belongs to.
    pub employee_code: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Resolved check-in.
    #[serde(with = "hhmm_option")]
    pub first_punch: Option<NaiveTime>,
    /// Resolved check-out.
    #[serde(with = "hhmm_option")]
    pub last_punch: Option<NaiveTime>,
    /// Effective shift start.
    #[serde(with = "hhmm")]
    pub shift_start: NaiveTime,
    /// Effective shift end.
    #[serde(with = "hhmm")]
    pub shift_end: NaiveTime,
    /// An absence penalty applied.
    pub is_absent: bool,
    /// At least one mission exists for the day.
    pub is_mission: bool,
    /// A leave covers the day.
    pub is_leave: bool,
    /// The day is a configured weekend day.
    pub is_weekend: bool,
    /// Penalties were suppressed for the day.
    pub suppress_penalties: bool,
    /// Lateness penalty (days).
    pub late_penalty: Decimal,
    /// Early-leave penalty (days).
    pub early_penalty: Decimal,
    /// Missing check-in/check-out penalty (days).
    pub missing_punch_penalty: Decimal,
    /// Absence penalty (days).
    pub absence_penalty: Decimal,
    /// Sum of the four penalties.
    pub total_deduction: Decimal,
    /// Overtime before shift start (hours).
    pub early_overtime: Decimal,
    /// Overtime after shift end, or overnight overtime (hours).
    pub late_overtime: Decimal,
    /// Sum of early and late overtime.
    pub total_overtime: Decimal,
    /// Processing log lines, ending with the serialized audit trace.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl DailyAttendance {
    /// The (employee code, date) key the record is stored under.
    pub fn key(&self) -> (String, NaiveDate) {
        (self.employee_code.clone(), self.date)
    }

    /// Decodes the audit trace from the record's logs.
    ///
    /// Returns [`EngineError::AuditTraceMissing`] when the logs carry no
    /// audit line.
    pub fn audit_trace(&self) -> EngineResult<AuditTrace> {
        AuditTrace::from_logs(&self.logs)?.ok_or_else(|| EngineError::AuditTraceMissing {
            employee_code: self.employee_code.clone(),
            date: self.date,
        })
    }

    /// Minutes between shift start and check-in when the employee arrived late.
    pub fn late_minutes(&self) -> i64 {
        self.first_punch
            .map(|check_in| (check_in - self.shift_start).num_minutes().max(0))
            .unwrap_or(0)
    }
}
