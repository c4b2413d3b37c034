//! Calculation logic for the Attendance Engine.
//!
//! This module contains everything that turns a snapshot of facts into daily
//! attendance records: special rule matching and effect merging, shift and
//! stamp resolution, penalty and overtime calculation, audit trace assembly,
//! the run entry points, and the monthly summary.

mod assembler;
mod audit_trace;
mod effect_resolver;
mod overtime;
mod penalty;
mod rule_matcher;
mod shift_resolver;
mod stamp_resolver;
mod summary;

pub use assembler::{
    calculate_attendance_for_date, calculate_attendance_records,
    calculate_attendance_records_parallel,
};
pub use audit_trace::AuditTraceBuilder;
pub use effect_resolver::{
    OvernightOvertime, RuleEffect, build_audit_rules, merge_effects, parse_effect,
};
pub use overtime::{OvertimeResult, calculate_overtime, minutes_to_hours};
pub use penalty::{PenaltyResult, PenaltySuppression, calculate_penalties, penalty_suppression};
pub use rule_matcher::{AppliedRule, RuleContext, get_applicable_rules};
pub use shift_resolver::{default_shift, resolve_shift};
pub use stamp_resolver::{ResolvedStamps, resolve_stamps};
pub use summary::summarize_month;
