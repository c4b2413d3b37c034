//! Configuration types for attendance evaluation.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from `policy.yaml`. Every field has a default matching the
//! built-in attendance policy, so a policy file only needs the values it
//! changes.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftWindow;
use crate::models::clock::{clock, hhmm};

/// One lateness tier: arriving more than `over_minutes` late costs `penalty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatenessTier {
    /// Minutes late that must be exceeded for the tier to apply.
    pub over_minutes: i64,
    /// Penalty in days.
    pub penalty: Decimal,
}

/// Early-leave penalty policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyLeavePolicy {
    /// Minutes before shift end that may pass without penalty.
    pub grace_minutes: i64,
    /// Penalty in days once the grace is exceeded.
    pub penalty: Decimal,
}

/// Built-in shortened shift on one day of the week.
///
/// Applies only when no custom shift is in effect and the employee's default
/// start equals `baseline_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedDayPolicy {
    /// Day of the week the shortening applies, 0 = Sunday.
    pub day_of_week: u8,
    /// Default start the shortening is anchored to.
    #[serde(with = "hhmm")]
    pub baseline_start: NaiveTime,
    /// Job-title substring identifying auxiliary-services staff.
    pub auxiliary_job_marker: String,
    /// Shortened end for auxiliary-services staff.
    #[serde(with = "hhmm")]
    pub auxiliary_end: NaiveTime,
    /// Shortened end for everyone else.
    #[serde(with = "hhmm")]
    pub standard_end: NaiveTime,
}

impl Default for ShortenedDayPolicy {
    fn default() -> Self {
        Self {
            day_of_week: 6,
            baseline_start: clock(8, 0),
            auxiliary_job_marker: "خدمات معاونة".to_string(),
            auxiliary_end: clock(15, 0),
            standard_end: clock(14, 0),
        }
    }
}

/// How overlapping keys of several `PENALTY_OVERRIDE` rules are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyOverrideMerge {
    /// Rules are applied highest priority first and each one overwrites the
    /// keys it specifies, so the lowest-priority value survives.
    #[default]
    LastApplied,
    /// The highest-priority rule's value for a key is kept, like every
    /// other effect slot.
    HighestPriority,
}

/// The complete attendance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shift used when an employee has none configured.
    pub default_shift: ShiftWindow,
    /// Days on which penalties are always suppressed, 0 = Sunday.
    pub rest_days: Vec<u8>,
    /// Days flagged as weekend on the daily record, 0 = Sunday.
    pub weekend_days: Vec<u8>,
    /// Built-in shortened day.
    pub shortened_day: ShortenedDayPolicy,
    /// Lateness tiers.
    pub lateness_tiers: Vec<LatenessTier>,
    /// Early-leave policy.
    pub early_leave: EarlyLeavePolicy,
    /// Penalty when only one stamp exists.
    pub missing_punch_penalty: Decimal,
    /// Penalty when no stamp exists.
    pub absence_penalty: Decimal,
    /// Overnight cap used when a rule does not set one.
    pub default_max_overnight_hours: Decimal,
    /// Merge order for penalty overrides.
    pub penalty_override_merge: PenaltyOverrideMerge,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_shift: ShiftWindow::new(clock(8, 0), clock(16, 0)),
            rest_days: vec![5],
            weekend_days: vec![5, 6],
            shortened_day: ShortenedDayPolicy::default(),
            lateness_tiers: vec![
                LatenessTier {
                    over_minutes: 60,
                    penalty: Decimal::ONE,
                },
                LatenessTier {
                    over_minutes: 30,
                    penalty: Decimal::new(5, 1),
                },
                LatenessTier {
                    over_minutes: 15,
                    penalty: Decimal::new(25, 2),
                },
            ],
            early_leave: EarlyLeavePolicy {
                grace_minutes: 5,
                penalty: Decimal::new(5, 1),
            },
            missing_punch_penalty: Decimal::new(5, 1),
            absence_penalty: Decimal::ONE,
            default_max_overnight_hours: Decimal::from(24),
            penalty_override_merge: PenaltyOverrideMerge::LastApplied,
        }
    }
}

impl EngineConfig {
    /// Returns true if penalties are suppressed on `date` regardless of data.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.rest_days.contains(&day_index(date))
    }

    /// Returns true if `date` is flagged as a weekend day.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&day_index(date))
    }

    /// Returns true if `date` falls on the shortened day.
    pub fn is_shortened_day(&self, date: NaiveDate) -> bool {
        day_index(date) == self.shortened_day.day_of_week
    }

    /// Returns the lateness penalty for arriving `minutes_late` minutes late.
    ///
    /// The highest tier whose threshold is exceeded wins; the tier order in
    /// the policy file does not matter.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::config::EngineConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = EngineConfig::default();
    /// assert_eq!(config.lateness_penalty(15), Decimal::ZERO);
    /// assert_eq!(config.lateness_penalty(16), Decimal::new(25, 2));
    /// assert_eq!(config.lateness_penalty(31), Decimal::new(5, 1));
    /// assert_eq!(config.lateness_penalty(61), Decimal::ONE);
    /// ```
    pub fn lateness_penalty(&self, minutes_late: i64) -> Decimal {
        self.lateness_tiers
            .iter()
            .filter(|tier| minutes_late > tier.over_minutes)
            .max_by_key(|tier| tier.over_minutes)
            .map(|tier| tier.penalty)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the early-leave penalty for leaving `minutes_early` minutes early.
    pub fn early_leave_penalty(&self, minutes_early: i64) -> Decimal {
        if minutes_early > self.early_leave.grace_minutes {
            self.early_leave.penalty
        } else {
            Decimal::ZERO
        }
    }
}

/// Day of the week with 0 = Sunday, the numbering used by rules and policy.
pub fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
