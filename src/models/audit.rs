//! Audit trace models.
//!
//! An [`AuditTrace`] records every fact and decision behind one day's
//! attendance record. It is stored inside the record's `logs` as a single
//! `Audit: <json>` line so that consumers holding only the record can drill
//! down into how it was produced.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::hhmm;
use super::special_rule::RuleType;
use crate::error::{EngineError, EngineResult};

/// Prefix of the log line carrying the serialized audit trace.
pub const AUDIT_LOG_PREFIX: &str = "Audit: ";

/// An effective shift window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Shift start.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Shift end.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl ShiftWindow {
    /// Creates a window from its boundaries.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Where a resolved stamp came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampSource {
    /// A biometric punch.
    #[default]
    Biometric,
    /// A mission's start or end time.
    Mission,
}

/// A penalty category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyCategory {
    /// Arrived after shift start.
    Late,
    /// Left before shift end.
    Early,
    /// Only one of check-in/check-out was recorded.
    MissingPunch,
    /// No stamps at all.
    Absence,
}

impl std::fmt::Display for PenaltyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PenaltyCategory::Late => write!(f, "late"),
            PenaltyCategory::Early => write!(f, "early"),
            PenaltyCategory::MissingPunch => write!(f, "missing_punch"),
            PenaltyCategory::Absence => write!(f, "absence"),
        }
    }
}

/// An overtime category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeKind {
    /// Checked in before shift start.
    Early,
    /// Checked out after shift end.
    Late,
    /// Shift closed by the next day's first punch.
    Overnight,
}

/// One matched rule, as recorded in the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRuleEntry {
    /// The rule's identifier.
    pub rule_id: String,
    /// The rule's name.
    pub rule_name: String,
    /// The rule's kind.
    pub rule_type: RuleType,
    /// The rule's priority.
    pub priority: i32,
}

/// One penalty decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyEntry {
    /// The penalty category.
    #[serde(rename = "type")]
    pub category: PenaltyCategory,
    /// The penalty value as computed, before any override.
    pub value: Decimal,
    /// Why the penalty was applied.
    pub reason: String,
    /// Whether an override ignored this penalty.
    pub suppressed: bool,
}

/// One overtime decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// The overtime category.
    #[serde(rename = "type")]
    pub kind: OvertimeKind,
    /// Overtime minutes.
    pub minutes: i64,
    /// Why the overtime was credited.
    pub reason: String,
}

/// The structured explanation of one day's attendance record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The day's punches in chronological order, as received.
    pub raw_punches: Vec<NaiveDateTime>,
    /// Summaries of the day's missions.
    pub applied_missions: Vec<String>,
    /// Summaries of the leaves covering the day.
    pub applied_leaves: Vec<String>,
    /// Every matched rule, highest priority first.
    pub applied_rules: Vec<AppliedRuleEntry>,
    /// The effective shift window.
    pub shift_used: Option<ShiftWindow>,
    /// Source of the resolved check-in.
    pub first_stamp_source: StampSource,
    /// Source of the resolved check-out.
    pub last_stamp_source: StampSource,
    /// Penalty decisions.
    pub penalties: Vec<PenaltyEntry>,
    /// Overtime decisions.
    pub overtime_details: Vec<OvertimeEntry>,
    /// Free-text decisions.
    pub notes: Vec<String>,
}

impl AuditTrace {
    /// Encodes the trace as an `Audit: <json>` log line.
    pub fn to_log_entry(&self) -> EngineResult<String> {
        let json = serde_json::to_string(self).map_err(|e| EngineError::AuditTraceEncode {
            message: e.to_string(),
        })?;
        Ok(format!("{}{}", AUDIT_LOG_PREFIX, json))
    }

    /// Decodes the last audit line found in `logs`.
    ///
    /// Returns `Ok(None)` when no line carries the audit prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::AuditTrace;
    ///
    /// let mut trace = AuditTrace::default();
    /// trace.notes.push("Friday: penalties suppressed".to_string());
    ///
    /// let logs = vec!["Processing EMP001".to_string(), trace.to_log_entry().unwrap()];
    /// let decoded = AuditTrace::from_logs(&logs).unwrap();
    /// assert_eq!(decoded, Some(trace));
    /// ```
    pub fn from_logs(logs: &[String]) -> EngineResult<Option<AuditTrace>> {
        match logs
            .iter()
            .rev()
            .find_map(|line| line.strip_prefix(AUDIT_LOG_PREFIX))
        {
            Some(json) => serde_json::from_str(json).map(Some).map_err(|e| {
                EngineError::AuditTraceDecode {
                    message: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    /// Returns true if an overtime entry of `kind` was recorded.
    pub fn has_overtime(&self, kind: OvertimeKind) -> bool {
        self.overtime_details.iter().any(|entry| entry.kind == kind)
    }
}
