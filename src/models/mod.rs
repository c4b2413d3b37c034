//! Core data models for the Attendance Engine.
//!
//! This module contains the input facts (employees, punches, missions,
//! leaves, special rules), the computed daily record with its audit trace,
//! and the monthly summary.

mod adjustment;
mod attendance;
mod audit;
pub mod clock;
mod employee;
mod punch;
mod snapshot;
mod special_rule;
mod summary;

pub use adjustment::{Leave, Mission};
pub use attendance::DailyAttendance;
pub use audit::{
    AUDIT_LOG_PREFIX, AppliedRuleEntry, AuditTrace, OvertimeEntry, OvertimeKind, PenaltyCategory,
    PenaltyEntry, ShiftWindow, StampSource,
};
pub use employee::Employee;
pub use punch::Punch;
pub use snapshot::AttendanceSnapshot;
pub use special_rule::{
    AttendanceExemptParams, CustomShiftParams, IgnoreBiometricParams, OvertimeOvernightParams,
    PenaltyOverride, PenaltyOverrideParams, RuleKind, RuleType, ScopeType, SpecialRule,
};
pub use summary::{MonthlySummary, YearMonth};
