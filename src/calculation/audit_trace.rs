//! Audit trace assembly.
//!
//! The [`AuditTraceBuilder`] collects the facts and decisions produced while
//! evaluating one day and turns them into an [`AuditTrace`].

use crate::models::{AppliedRuleEntry, AuditTrace, Leave, ShiftWindow};

use super::overtime::OvertimeResult;
use super::penalty::{PenaltyResult, PenaltySuppression};
use super::stamp_resolver::ResolvedStamps;

/// Incrementally builds an [`AuditTrace`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::AuditTraceBuilder;
/// use attendance_engine::models::ShiftWindow;
/// use attendance_engine::models::clock::clock;
///
/// let trace = AuditTraceBuilder::new()
///     .shift(ShiftWindow::new(clock(8, 0), clock(16, 0)))
///     .build();
///
/// assert_eq!(trace.shift_used, Some(ShiftWindow::new(clock(8, 0), clock(16, 0))));
/// assert!(trace.notes.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuditTraceBuilder {
    trace: AuditTrace,
}

impl AuditTraceBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the matched rules.
    pub fn rules(mut self, rules: Vec<AppliedRuleEntry>) -> Self {
        self.trace.applied_rules = rules;
        self
    }

    /// Records the leaves covering the day.
    pub fn leaves(mut self, leaves: &[&Leave]) -> Self {
        self.trace.applied_leaves = leaves.iter().map(|leave| leave.summary()).collect();
        self
    }

    /// Records the effective shift.
    pub fn shift(mut self, shift: ShiftWindow) -> Self {
        self.trace.shift_used = Some(shift);
        self
    }

    /// Records the raw punches, missions, stamp sources and stamp notes.
    pub fn stamps(mut self, stamps: &ResolvedStamps) -> Self {
        self.trace.raw_punches = stamps.raw_punches.clone();
        self.trace.applied_missions = stamps.applied_missions.clone();
        self.trace.first_stamp_source = stamps.first_source;
        self.trace.last_stamp_source = stamps.last_source;
        self.trace.notes.extend(stamps.notes.iter().cloned());
        self
    }

    /// Records why penalties were suppressed.
    pub fn suppression(mut self, suppression: &PenaltySuppression) -> Self {
        self.trace.notes.extend(suppression.reasons.iter().cloned());
        self
    }

    /// Records the penalty entries and override notes.
    pub fn penalties(mut self, penalties: &PenaltyResult) -> Self {
        self.trace.penalties = penalties.entries.clone();
        self.trace.notes.extend(penalties.notes.iter().cloned());
        self
    }

    /// Records the overtime entries.
    pub fn overtime(mut self, overtime: &OvertimeResult) -> Self {
        self.trace.overtime_details = overtime.entries.clone();
        self
    }

    /// Finishes the trace.
    pub fn build(self) -> AuditTrace {
        self.trace
    }
}
