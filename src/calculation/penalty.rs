//! Penalty calculation.
//!
//! This module decides whether a day's penalties are suppressed and, when
//! they are not, computes the lateness, early-leave, missing-stamp and
//! absence penalties in days. Penalty overrides from special rules are
//! applied last.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{PenaltyCategory, PenaltyEntry, PenaltyOverride, ShiftWindow};

use super::effect_resolver::RuleEffect;

/// Whether a day's penalties are suppressed, and why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltySuppression {
    /// True when at least one cause applies.
    pub suppressed: bool,
    /// One note per cause.
    pub reasons: Vec<String>,
}

/// Determines whether penalties are suppressed on `date`.
///
/// Penalties are suppressed by an attendance exemption that exempts
/// penalties, by a rest day, or by a leave covering the date. Every cause
/// that applies is reported.
pub fn penalty_suppression(
    date: NaiveDate,
    on_leave: bool,
    effect: &RuleEffect,
    config: &EngineConfig,
) -> PenaltySuppression {
    let mut reasons = Vec::new();

    if effect
        .attendance_exempt
        .as_ref()
        .is_some_and(|exempt| exempt.exempt_penalties)
    {
        reasons.push("Penalties exempted by ATTENDANCE_EXEMPT".to_string());
    }
    if config.is_rest_day(date) {
        reasons.push(format!("{}: rest day, penalties suppressed", date.format("%A")));
    }
    if on_leave {
        reasons.push("On leave, penalties suppressed".to_string());
    }

    PenaltySuppression {
        suppressed: !reasons.is_empty(),
        reasons,
    }
}

/// The penalties computed for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyResult {
    /// Lateness penalty after overrides.
    pub late_penalty: Decimal,
    /// Early-leave penalty after overrides.
    pub early_penalty: Decimal,
    /// Missing-stamp penalty.
    pub missing_punch_penalty: Decimal,
    /// Absence penalty after overrides.
    pub absence_penalty: Decimal,
    /// Sum of the four penalties.
    pub total_deduction: Decimal,
    /// Audit entries, one per non-zero computed penalty.
    pub entries: Vec<PenaltyEntry>,
    /// Override decisions.
    pub notes: Vec<String>,
}

impl PenaltyResult {
    /// Returns true if the day counts as an absence.
    pub fn is_absent(&self) -> bool {
        self.absence_penalty > Decimal::ZERO
    }

    fn push(&mut self, category: PenaltyCategory, value: Decimal, reason: String) {
        self.entries.push(PenaltyEntry {
            category,
            value,
            reason,
            suppressed: false,
        });
    }
}

/// Computes the day's penalties from the resolved stamps and shift.
///
/// # Arguments
///
/// * `check_in` / `check_out` - Resolved stamps, after any backfill
/// * `shift` - The effective shift window
/// * `suppressed` - Result of [`penalty_suppression`]
/// * `effect` - The merged rule effect, for penalty overrides
/// * `config` - Penalty tiers and values
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{RuleEffect, calculate_penalties};
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::ShiftWindow;
/// use attendance_engine::models::clock::clock;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftWindow::new(clock(8, 0), clock(16, 0));
/// let result = calculate_penalties(
///     Some(clock(8, 40)),
///     Some(clock(16, 0)),
///     &shift,
///     false,
///     &RuleEffect::default(),
///     &EngineConfig::default(),
/// );
///
/// assert_eq!(result.late_penalty, Decimal::new(5, 1));
/// assert_eq!(result.total_deduction, Decimal::new(5, 1));
/// ```
pub fn calculate_penalties(
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
    shift: &ShiftWindow,
    suppressed: bool,
    effect: &RuleEffect,
    config: &EngineConfig,
) -> PenaltyResult {
    let mut result = PenaltyResult::default();

    if !suppressed {
        match (check_in, check_out) {
            (None, None) => {
                result.absence_penalty = config.absence_penalty;
                result.push(
                    PenaltyCategory::Absence,
                    config.absence_penalty,
                    "Absence without excuse".to_string(),
                );
            }
            (Some(_), None) => {
                result.missing_punch_penalty = config.missing_punch_penalty;
                result.push(
                    PenaltyCategory::MissingPunch,
                    config.missing_punch_penalty,
                    "Missing check-out".to_string(),
                );
            }
            // A check-out alone, e.g. from a mission end, is not charged.
            (None, Some(_)) => {}
            (Some(check_in), Some(check_out)) if check_in == check_out => {
                result.missing_punch_penalty = config.missing_punch_penalty;
                result.push(
                    PenaltyCategory::MissingPunch,
                    config.missing_punch_penalty,
                    "Single stamp, check-out missing".to_string(),
                );
            }
            (Some(check_in), Some(check_out)) => {
                let late_minutes = (check_in - shift.start).num_minutes();
                let late = config.lateness_penalty(late_minutes);
                if late > Decimal::ZERO {
                    result.late_penalty = late;
                    result.push(
                        PenaltyCategory::Late,
                        late,
                        format!("{} minutes late", late_minutes),
                    );
                }

                let early_minutes = (shift.end - check_out).num_minutes();
                let early = config.early_leave_penalty(early_minutes);
                if early > Decimal::ZERO {
                    result.early_penalty = early;
                    result.push(
                        PenaltyCategory::Early,
                        early,
                        format!("{} minutes early", early_minutes),
                    );
                }
            }
        }
    }

    if let Some(overrides) = &effect.penalty_override {
        let slots = [
            (PenaltyCategory::Late, overrides.late_penalty),
            (PenaltyCategory::Early, overrides.early_penalty),
            (PenaltyCategory::Absence, overrides.absence_penalty),
        ];
        for (category, slot) in slots {
            if let Some(value) = slot {
                apply_override(&mut result, category, value);
            }
        }
    }

    result.total_deduction = result.late_penalty
        + result.early_penalty
        + result.missing_punch_penalty
        + result.absence_penalty;
    result
}

fn apply_override(result: &mut PenaltyResult, category: PenaltyCategory, value: PenaltyOverride) {
    let slot = match category {
        PenaltyCategory::Late => &mut result.late_penalty,
        PenaltyCategory::Early => &mut result.early_penalty,
        PenaltyCategory::Absence => &mut result.absence_penalty,
        PenaltyCategory::MissingPunch => return,
    };

    match value {
        PenaltyOverride::Ignore => {
            *slot = Decimal::ZERO;
            for entry in result
                .entries
                .iter_mut()
                .filter(|entry| entry.category == category)
            {
                entry.suppressed = true;
            }
            result
                .notes
                .push(format!("{} penalty ignored by override", category));
        }
        PenaltyOverride::Force(forced) => {
            *slot = forced;
            result
                .notes
                .push(format!("{} penalty forced to {} by override", category, forced));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock::clock;
    use crate::models::{AttendanceExemptParams, PenaltyOverrideParams};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn standard_shift() -> ShiftWindow {
        ShiftWindow::new(clock(8, 0), clock(16, 0))
    }

    fn penalties(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> PenaltyResult {
        calculate_penalties(
            check_in,
            check_out,
            &standard_shift(),
            false,
            &RuleEffect::default(),
            &EngineConfig::default(),
        )
    }

    fn with_overrides(params: PenaltyOverrideParams) -> RuleEffect {
        RuleEffect {
            penalty_override: Some(params),
            ..RuleEffect::default()
        }
    }

    // ==========================================================================
    // Suppression gate
    // ==========================================================================

    #[test]
    fn test_friday_is_suppressed() {
        let config = EngineConfig::default();
        let result = penalty_suppression(
            make_date("2025-12-19"),
            false,
            &RuleEffect::default(),
            &config,
        );
        assert!(result.suppressed);
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn test_every_suppression_cause_is_reported() {
        let config = EngineConfig::default();
        let effect = RuleEffect {
            attendance_exempt: Some(AttendanceExemptParams::default()),
            ..RuleEffect::default()
        };

        let result = penalty_suppression(make_date("2025-12-19"), true, &effect, &config);
        assert!(result.suppressed);
        assert_eq!(result.reasons.len(), 3);
    }

    #[test]
    fn test_exemption_without_penalty_flag_does_not_suppress() {
        let config = EngineConfig::default();
        let effect = RuleEffect {
            attendance_exempt: Some(AttendanceExemptParams {
                count_as_present: true,
                exempt_penalties: false,
            }),
            ..RuleEffect::default()
        };

        let result = penalty_suppression(make_date("2025-12-15"), false, &effect, &config);
        assert!(!result.suppressed);
        assert!(result.reasons.is_empty());
    }

    // ==========================================================================
    // Stamp-based penalties
    // ==========================================================================

    #[test]
    fn test_no_stamps_is_absence() {
        let result = penalties(None, None);
        assert_eq!(result.absence_penalty, dec("1"));
        assert_eq!(result.total_deduction, dec("1"));
        assert!(result.is_absent());
        assert_eq!(result.entries[0].category, PenaltyCategory::Absence);
    }

    #[test]
    fn test_missing_checkout() {
        let result = penalties(Some(clock(8, 0)), None);
        assert_eq!(result.missing_punch_penalty, dec("0.5"));
        assert_eq!(result.total_deduction, dec("0.5"));
        assert!(!result.is_absent());
    }

    #[test]
    fn test_checkout_without_checkin_is_not_charged() {
        let result = penalties(None, Some(clock(14, 0)));
        assert_eq!(result.missing_punch_penalty, Decimal::ZERO);
        assert_eq!(result.total_deduction, Decimal::ZERO);
        assert!(result.entries.is_empty());
        assert!(!result.is_absent());
    }

    #[test]
    fn test_identical_stamps_count_as_missing() {
        let result = penalties(Some(clock(9, 30)), Some(clock(9, 30)));
        assert_eq!(result.missing_punch_penalty, dec("0.5"));
        assert_eq!(result.late_penalty, Decimal::ZERO);
    }

    #[test]
    fn test_lateness_tiers() {
        let cases = [
            (clock(8, 15), Decimal::ZERO),
            (clock(8, 16), dec("0.25")),
            (clock(8, 31), dec("0.5")),
            (clock(9, 1), dec("1")),
        ];

        for (check_in, expected) in cases {
            let result = penalties(Some(check_in), Some(clock(16, 0)));
            assert_eq!(result.late_penalty, expected, "check-in {}", check_in);
        }
    }

    #[test]
    fn test_late_entry_reason() {
        let result = penalties(Some(clock(8, 20)), Some(clock(16, 0)));
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].reason, "20 minutes late");
        assert!(!result.entries[0].suppressed);
    }

    #[test]
    fn test_early_leave_grace() {
        let within_grace = penalties(Some(clock(8, 0)), Some(clock(15, 55)));
        assert_eq!(within_grace.early_penalty, Decimal::ZERO);
        assert!(within_grace.entries.is_empty());

        let beyond_grace = penalties(Some(clock(8, 0)), Some(clock(15, 54)));
        assert_eq!(beyond_grace.early_penalty, dec("0.5"));
    }

    #[test]
    fn test_late_and_early_add_up() {
        let result = penalties(Some(clock(9, 30)), Some(clock(14, 0)));
        assert_eq!(result.late_penalty, dec("1"));
        assert_eq!(result.early_penalty, dec("0.5"));
        assert_eq!(result.total_deduction, dec("1.5"));
    }

    #[test]
    fn test_suppressed_day_has_no_penalties() {
        let result = calculate_penalties(
            None,
            None,
            &standard_shift(),
            true,
            &RuleEffect::default(),
            &EngineConfig::default(),
        );
        assert_eq!(result.total_deduction, Decimal::ZERO);
        assert!(result.entries.is_empty());
    }

    // ==========================================================================
    // Overrides
    // ==========================================================================

    #[test]
    fn test_ignore_override_zeroes_and_marks_entries() {
        let effect = with_overrides(PenaltyOverrideParams {
            late_penalty: Some(PenaltyOverride::Ignore),
            ..PenaltyOverrideParams::default()
        });

        let result = calculate_penalties(
            Some(clock(9, 30)),
            Some(clock(16, 0)),
            &standard_shift(),
            false,
            &effect,
            &EngineConfig::default(),
        );

        assert_eq!(result.late_penalty, Decimal::ZERO);
        assert_eq!(result.total_deduction, Decimal::ZERO);
        assert_eq!(result.entries.len(), 1);
        assert!(result.entries[0].suppressed);
        assert_eq!(result.entries[0].value, dec("1"));
    }

    #[test]
    fn test_force_override_sets_value() {
        let effect = with_overrides(PenaltyOverrideParams {
            early_penalty: Some(PenaltyOverride::Force(dec("0.25"))),
            ..PenaltyOverrideParams::default()
        });

        let result = calculate_penalties(
            Some(clock(8, 0)),
            Some(clock(14, 0)),
            &standard_shift(),
            false,
            &effect,
            &EngineConfig::default(),
        );

        assert_eq!(result.early_penalty, dec("0.25"));
        assert_eq!(result.total_deduction, dec("0.25"));
        assert_eq!(result.entries[0].value, dec("0.5"));
    }

    #[test]
    fn test_ignore_absence_clears_absent_flag() {
        let effect = with_overrides(PenaltyOverrideParams {
            absence_penalty: Some(PenaltyOverride::Ignore),
            ..PenaltyOverrideParams::default()
        });

        let result = calculate_penalties(
            None,
            None,
            &standard_shift(),
            false,
            &effect,
            &EngineConfig::default(),
        );

        assert!(!result.is_absent());
        assert_eq!(result.total_deduction, Decimal::ZERO);
        assert!(result.entries[0].suppressed);
    }

    #[test]
    fn test_force_override_applies_on_suppressed_day() {
        let config = EngineConfig::default();
        let effect = with_overrides(PenaltyOverrideParams {
            absence_penalty: Some(PenaltyOverride::Force(dec("1"))),
            ..PenaltyOverrideParams::default()
        });
        let suppression = penalty_suppression(make_date("2025-12-15"), true, &effect, &config);

        let result = calculate_penalties(
            None,
            None,
            &standard_shift(),
            suppression.suppressed,
            &effect,
            &config,
        );

        assert!(suppression.suppressed);
        assert_eq!(result.absence_penalty, dec("1"));
        assert_eq!(result.total_deduction, dec("1"));
        assert!(result.is_absent());
        assert!(result.entries.is_empty());
        assert_eq!(result.notes, vec!["absence penalty forced to 1 by override"]);
    }
}
