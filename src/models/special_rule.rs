//! Special rule model.
//!
//! A special rule is a scoped, dated override: it can replace the shift
//! window, exempt an employee from penalties, force or ignore individual
//! penalty categories, discard biometric data, or link a shift's checkout to
//! the next day's first punch. The rule kind is a tagged union keyed by
//! `rule_type`, so every payload is validated when the rule is deserialized.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clock::hhmm_option;

/// Which attribute of an employee a rule is scoped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    /// Matches employees whose code is listed in `scope_values`.
    Employee,
    /// Matches employees whose department is listed in `scope_values`.
    Department,
    /// Matches employees whose branch is listed in `scope_values`.
    Branch,
    /// Matches every employee; `scope_values` is ignored.
    All,
}

/// The kind of a rule, without its payload.
///
/// Used in audit traces, where only the kind is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// Replaces the shift window.
    CustomShift,
    /// Counts the day as present and/or exempts it from penalties.
    AttendanceExempt,
    /// Forces or ignores individual penalty categories.
    PenaltyOverride,
    /// Discards the day's biometric punches.
    IgnoreBiometric,
    /// Links the shift end to the next day's first punch.
    OvertimeOvernight,
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleType::CustomShift => write!(f, "CUSTOM_SHIFT"),
            RuleType::AttendanceExempt => write!(f, "ATTENDANCE_EXEMPT"),
            RuleType::PenaltyOverride => write!(f, "PENALTY_OVERRIDE"),
            RuleType::IgnoreBiometric => write!(f, "IGNORE_BIOMETRIC"),
            RuleType::OvertimeOvernight => write!(f, "OVERTIME_OVERNIGHT"),
        }
    }
}

/// Parameters of a `CUSTOM_SHIFT` rule.
///
/// Missing boundaries fall back to the configured default shift when the
/// effect is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomShiftParams {
    /// Replacement shift start.
    #[serde(with = "hhmm_option")]
    pub shift_start: Option<NaiveTime>,
    /// Replacement shift end.
    #[serde(with = "hhmm_option")]
    pub shift_end: Option<NaiveTime>,
}

/// Parameters of an `ATTENDANCE_EXEMPT` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceExemptParams {
    /// Backfill missing stamps with the shift boundaries.
    pub count_as_present: bool,
    /// Suppress every penalty for the day.
    pub exempt_penalties: bool,
}

impl Default for AttendanceExemptParams {
    fn default() -> Self {
        Self {
            count_as_present: false,
            exempt_penalties: true,
        }
    }
}

/// An override for a single penalty category.
///
/// On the wire this is either a number (the forced value) or the string
/// `"IGNORE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyOverride {
    /// Zero the category and mark its audit entries as suppressed.
    Ignore,
    /// Force the category to this value.
    Force(Decimal),
}

impl Serialize for PenaltyOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PenaltyOverride::Ignore => serializer.serialize_str("IGNORE"),
            PenaltyOverride::Force(value) => Serialize::serialize(value, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PenaltyOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) if text.trim().eq_ignore_ascii_case("IGNORE") => {
                Ok(PenaltyOverride::Ignore)
            }
            Raw::Text(text) => text
                .trim()
                .parse::<Decimal>()
                .map(PenaltyOverride::Force)
                .map_err(|_| {
                    D::Error::custom(format!(
                        "invalid penalty override '{text}', expected a number or \"IGNORE\""
                    ))
                }),
            Raw::Number(value) => Ok(PenaltyOverride::Force(value)),
        }
    }
}

/// Parameters of a `PENALTY_OVERRIDE` rule.
///
/// Only the categories that are present take part in the override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyOverrideParams {
    /// Override for the lateness penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_penalty: Option<PenaltyOverride>,
    /// Override for the early-leave penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_penalty: Option<PenaltyOverride>,
    /// Override for the absence penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_penalty: Option<PenaltyOverride>,
}

/// Parameters of an `IGNORE_BIOMETRIC` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreBiometricParams {
    /// Whether punches are discarded. Only an explicit `false` disables it.
    pub ignore: bool,
}

impl Default for IgnoreBiometricParams {
    fn default() -> Self {
        Self { ignore: true }
    }
}

/// Parameters of an `OVERTIME_OVERNIGHT` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeOvernightParams {
    /// Allow the next day's first punch to close the shift.
    pub allow_next_day_checkout: bool,
    /// Longest overnight link in hours. Missing or zero means the configured
    /// default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_overnight_hours: Option<Decimal>,
}

/// A rule kind together with its typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "rule_type",
    content = "params",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum RuleKind {
    /// `CUSTOM_SHIFT`
    CustomShift(CustomShiftParams),
    /// `ATTENDANCE_EXEMPT`
    AttendanceExempt(AttendanceExemptParams),
    /// `PENALTY_OVERRIDE`
    PenaltyOverride(PenaltyOverrideParams),
    /// `IGNORE_BIOMETRIC`
    IgnoreBiometric(IgnoreBiometricParams),
    /// `OVERTIME_OVERNIGHT`
    OvertimeOvernight(OvertimeOvernightParams),
}

impl RuleKind {
    /// The payload-free kind of this rule.
    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleKind::CustomShift(_) => RuleType::CustomShift,
            RuleKind::AttendanceExempt(_) => RuleType::AttendanceExempt,
            RuleKind::PenaltyOverride(_) => RuleType::PenaltyOverride,
            RuleKind::IgnoreBiometric(_) => RuleType::IgnoreBiometric,
            RuleKind::OvertimeOvernight(_) => RuleType::OvertimeOvernight,
        }
    }
}

/// A configured override rule.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{RuleType, ScopeType, SpecialRule};
///
/// let json = r#"{
///     "id": "rule_001",
///     "name": "Ramadan hours",
///     "scope_type": "all",
///     "date_from": "2026-02-18",
///     "date_to": "2026-03-19",
///     "rule_type": "CUSTOM_SHIFT",
///     "params": { "shift_start": "09:00", "shift_end": "15:00" },
///     "priority": 10
/// }"#;
///
/// let rule: SpecialRule = serde_json::from_str(json).unwrap();
/// assert_eq!(rule.scope_type, ScopeType::All);
/// assert_eq!(rule.kind.rule_type(), RuleType::CustomShift);
/// assert!(rule.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRule {
    /// Rule identifier, echoed in audit traces.
    pub id: String,
    /// Human-readable rule name.
    pub name: String,
    /// What the scope values are matched against.
    pub scope_type: ScopeType,
    /// Employee codes, departments or branches the rule applies to.
    #[serde(default)]
    pub scope_values: Vec<String>,
    /// First date the rule applies (inclusive). A rule without one never matches.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Last date the rule applies (inclusive). A rule without one never matches.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Days of the week the rule applies, 0 = Sunday. Empty means every day.
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// The rule kind and its parameters.
    #[serde(flatten)]
    pub kind: RuleKind,
    /// Disabled rules never match.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Higher priority wins when rules supply the same effect.
    #[serde(default)]
    pub priority: i32,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SpecialRule {
    /// Creates an enabled, priority-0 rule applying to everyone in the date range.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date_from: NaiveDate,
        date_to: NaiveDate,
        kind: RuleKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope_type: ScopeType::All,
            scope_values: Vec::new(),
            date_from: Some(date_from),
            date_to: Some(date_to),
            days_of_week: Vec::new(),
            kind,
            enabled: true,
            priority: 0,
            notes: None,
        }
    }

    /// Narrows the rule to a scope.
    pub fn scoped(mut self, scope_type: ScopeType, values: &[&str]) -> Self {
        self.scope_type = scope_type;
        self.scope_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Restricts the rule to the given days of the week (0 = Sunday).
    pub fn on_days(mut self, days: &[u8]) -> Self {
        self.days_of_week = days.to_vec();
        self
    }

    /// The payload-free kind of this rule.
    pub fn rule_type(&self) -> RuleType {
        self.kind.rule_type()
    }
}
