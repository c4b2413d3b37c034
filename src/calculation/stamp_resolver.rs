//! Check-in and check-out resolution.
//!
//! Stamps come from the day's biometric punches and may be replaced by the
//! first mission's start and end times.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::clock::{format_clock, truncate_to_minute};
use crate::models::{Mission, Punch, ShiftWindow, StampSource};

use super::effect_resolver::RuleEffect;

/// Resolved stamps for one employee on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStamps {
    /// Effective check-in.
    pub check_in: Option<NaiveTime>,
    /// Effective check-out.
    pub check_out: Option<NaiveTime>,
    /// Where the check-in came from.
    pub first_source: StampSource,
    /// Where the check-out came from.
    pub last_source: StampSource,
    /// Every punch of the day, chronological.
    pub raw_punches: Vec<NaiveDateTime>,
    /// Summaries of every mission of the day.
    pub applied_missions: Vec<String>,
    /// Decisions worth recording in the audit.
    pub notes: Vec<String>,
}

impl ResolvedStamps {
    /// Returns true if both stamps exist and differ.
    pub fn has_distinct_pair(&self) -> bool {
        matches!((self.check_in, self.check_out), (Some(a), Some(b)) if a != b)
    }

    /// Fills missing stamps with the shift boundaries when the merged effect
    /// counts the day as present.
    ///
    /// Returns true if the exemption was applied.
    pub fn apply_count_as_present(&mut self, shift: &ShiftWindow, effect: &RuleEffect) -> bool {
        let counts_as_present = effect
            .attendance_exempt
            .as_ref()
            .is_some_and(|exempt| exempt.count_as_present);
        if !counts_as_present {
            return false;
        }

        self.check_in.get_or_insert(shift.start);
        self.check_out.get_or_insert(shift.end);
        self.notes
            .push("Counted as present by ATTENDANCE_EXEMPT".to_string());
        true
    }
}

/// Resolves the day's stamps from its punches and missions.
///
/// `punches` may arrive in any order. When the merged effect ignores
/// biometric data the punches are still listed in `raw_punches` but do not
/// produce stamps. Only the first mission can replace a stamp: its start
/// replaces a missing or later check-in, and its end replaces a missing or
/// earlier check-out.
pub fn resolve_stamps(
    punches: &[&Punch],
    missions: &[&Mission],
    effect: &RuleEffect,
) -> ResolvedStamps {
    let mut raw_punches: Vec<NaiveDateTime> = punches.iter().map(|p| p.timestamp).collect();
    raw_punches.sort();

    let mut stamps = ResolvedStamps {
        raw_punches,
        ..ResolvedStamps::default()
    };

    if effect.ignore_biometric {
        stamps.notes.push("Biometric ignored by rule".to_string());
    } else {
        stamps.check_in = stamps.raw_punches.first().map(|ts| truncate_to_minute(ts.time()));
        stamps.check_out = stamps.raw_punches.last().map(|ts| truncate_to_minute(ts.time()));
    }

    stamps.applied_missions = missions.iter().map(|m| m.summary()).collect();

    if let Some(mission) = missions.first() {
        if let Some(start) = mission.start_time.map(truncate_to_minute) {
            if stamps.check_in.is_none_or(|check_in| start < check_in) {
                stamps.check_in = Some(start);
                stamps.first_source = StampSource::Mission;
                stamps
                    .notes
                    .push(format!("Check-in taken from mission start {}", format_clock(start)));
            }
        }
        if let Some(end) = mission.end_time.map(truncate_to_minute) {
            if stamps.check_out.is_none_or(|check_out| end > check_out) {
                stamps.check_out = Some(end);
                stamps.last_source = StampSource::Mission;
                stamps
                    .notes
                    .push(format!("Check-out taken from mission end {}", format_clock(end)));
            }
        }
    }

    stamps
}
