//! Rule effect parsing and merging.
//!
//! Each matched rule is turned into a [`RuleEffect`] filling exactly one
//! slot. The effects of all rules matched for a day are then merged into a
//! single resolved effect in priority order.

use rust_decimal::Decimal;

use crate::config::{EngineConfig, PenaltyOverrideMerge};
use crate::models::clock::truncate_to_minute;
use crate::models::{
    AppliedRuleEntry, AttendanceExemptParams, PenaltyOverride, PenaltyOverrideParams, RuleKind,
    ShiftWindow, SpecialRule,
};

use super::rule_matcher::AppliedRule;

/// Overnight overtime settings after defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvernightOvertime {
    /// Whether the next day's first punch may close the shift.
    pub allow_next_day_checkout: bool,
    /// Longest accepted gap between shift end and that punch, in hours.
    pub max_overnight_hours: Decimal,
}

impl OvernightOvertime {
    /// The cap expressed in minutes.
    pub fn max_minutes(&self) -> Decimal {
        self.max_overnight_hours * Decimal::from(60)
    }
}

/// The typed effect of one rule, or of several merged rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEffect {
    /// Replacement shift window.
    pub custom_shift: Option<ShiftWindow>,
    /// Attendance exemption.
    pub attendance_exempt: Option<AttendanceExemptParams>,
    /// Per-category penalty overrides.
    pub penalty_override: Option<PenaltyOverrideParams>,
    /// Discard the day's biometric punches.
    pub ignore_biometric: bool,
    /// Next-day checkout linking.
    pub overnight_overtime: Option<OvernightOvertime>,
}

/// Converts a rule into its effect, filling in defaults.
///
/// Missing custom shift boundaries fall back to the configured default
/// shift. A missing or zero overnight cap falls back to the configured
/// default cap.
pub fn parse_effect(rule: &SpecialRule, config: &EngineConfig) -> RuleEffect {
    let mut effect = RuleEffect::default();

    match &rule.kind {
        RuleKind::CustomShift(params) => {
            effect.custom_shift = Some(ShiftWindow::new(
                truncate_to_minute(params.shift_start.unwrap_or(config.default_shift.start)),
                truncate_to_minute(params.shift_end.unwrap_or(config.default_shift.end)),
            ));
        }
        RuleKind::AttendanceExempt(params) => {
            effect.attendance_exempt = Some(params.clone());
        }
        RuleKind::PenaltyOverride(params) => {
            effect.penalty_override = Some(params.clone());
        }
        RuleKind::IgnoreBiometric(params) => {
            effect.ignore_biometric = params.ignore;
        }
        RuleKind::OvertimeOvernight(params) => {
            let max_overnight_hours = params
                .max_overnight_hours
                .filter(|hours| !hours.is_zero())
                .unwrap_or(config.default_max_overnight_hours);
            effect.overnight_overtime = Some(OvernightOvertime {
                allow_next_day_checkout: params.allow_next_day_checkout,
                max_overnight_hours,
            });
        }
    }

    effect
}

/// Merges the effects of `applied`, which must be ordered highest priority first.
///
/// Single-value slots keep the first value supplied. Penalty overrides are
/// merged per category; which rule wins an overlapping category depends on
/// [`EngineConfig::penalty_override_merge`].
pub fn merge_effects(applied: &[AppliedRule<'_>], config: &EngineConfig) -> RuleEffect {
    let mut merged = RuleEffect::default();

    for AppliedRule { effect, .. } in applied {
        if merged.custom_shift.is_none() {
            merged.custom_shift = effect.custom_shift;
        }
        if merged.attendance_exempt.is_none() {
            merged.attendance_exempt = effect.attendance_exempt.clone();
        }
        if let Some(overrides) = &effect.penalty_override {
            let target = merged.penalty_override.get_or_insert_with(Default::default);
            merge_overrides(target, overrides, config.penalty_override_merge);
        }
        merged.ignore_biometric |= effect.ignore_biometric;
        if merged.overnight_overtime.is_none() {
            merged.overnight_overtime = effect.overnight_overtime;
        }
    }

    merged
}

fn merge_overrides(
    target: &mut PenaltyOverrideParams,
    source: &PenaltyOverrideParams,
    order: PenaltyOverrideMerge,
) {
    merge_slot(&mut target.late_penalty, source.late_penalty, order);
    merge_slot(&mut target.early_penalty, source.early_penalty, order);
    merge_slot(&mut target.absence_penalty, source.absence_penalty, order);
}

fn merge_slot(
    target: &mut Option<PenaltyOverride>,
    source: Option<PenaltyOverride>,
    order: PenaltyOverrideMerge,
) {
    let Some(value) = source else {
        return;
    };
    match order {
        PenaltyOverrideMerge::LastApplied => *target = Some(value),
        PenaltyOverrideMerge::HighestPriority => {
            target.get_or_insert(value);
        }
    }
}

/// Builds the audit list of matched rules, preserving their order.
pub fn build_audit_rules(applied: &[AppliedRule<'_>]) -> Vec<AppliedRuleEntry> {
    applied
        .iter()
        .map(|AppliedRule { rule, .. }| AppliedRuleEntry {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            rule_type: rule.rule_type(),
            priority: rule.priority,
        })
        .collect()
}
