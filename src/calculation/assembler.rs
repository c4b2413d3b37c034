//! Daily record assembly.
//!
//! This module drives a calculation run: it indexes the snapshot, evaluates
//! every requested (employee, date) pair through rule matching, shift and
//! stamp resolution, penalty and overtime calculation, and emits one
//! [`DailyAttendance`] per pair with its audit trace attached.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::models::clock::format_clock;
use crate::models::{
    AttendanceSnapshot, DailyAttendance, Employee, Leave, Mission, Punch, SpecialRule,
    StampSource,
};

use super::audit_trace::AuditTraceBuilder;
use super::effect_resolver::{build_audit_rules, merge_effects};
use super::overtime::calculate_overtime;
use super::penalty::{calculate_penalties, penalty_suppression};
use super::rule_matcher::{RuleContext, get_applicable_rules};
use super::shift_resolver::resolve_shift;
use super::stamp_resolver::resolve_stamps;

type DayKey<'a> = (&'a str, NaiveDate);

/// Read-only lookups over a snapshot, shared by every evaluation of a run.
struct SnapshotIndex<'a> {
    employees: BTreeMap<&'a str, &'a Employee>,
    punches: HashMap<DayKey<'a>, Vec<&'a Punch>>,
    missions: HashMap<DayKey<'a>, Vec<&'a Mission>>,
    leaves: HashMap<&'a str, Vec<&'a Leave>>,
    rules: &'a [SpecialRule],
}

impl<'a> SnapshotIndex<'a> {
    fn build(snapshot: &'a AttendanceSnapshot) -> Self {
        let mut employees = BTreeMap::new();
        for employee in &snapshot.employees {
            employees.entry(employee.code.as_str()).or_insert(employee);
        }

        let mut punches: HashMap<DayKey<'a>, Vec<&'a Punch>> = HashMap::new();
        for punch in &snapshot.punches {
            punches
                .entry((punch.employee_code.as_str(), punch.date()))
                .or_default()
                .push(punch);
        }
        for day in punches.values_mut() {
            day.sort_by_key(|punch| punch.timestamp);
        }

        let mut missions: HashMap<DayKey<'a>, Vec<&'a Mission>> = HashMap::new();
        for mission in &snapshot.missions {
            missions
                .entry((mission.employee_code.as_str(), mission.date))
                .or_default()
                .push(mission);
        }

        let mut leaves: HashMap<&'a str, Vec<&'a Leave>> = HashMap::new();
        for leave in &snapshot.leaves {
            leaves
                .entry(leave.employee_code.as_str())
                .or_default()
                .push(leave);
        }

        let index = Self {
            employees,
            punches,
            missions,
            leaves,
            rules: &snapshot.special_rules,
        };
        index.warn_unknown_employees(snapshot);
        index
    }

    fn warn_unknown_employees(&self, snapshot: &'a AttendanceSnapshot) {
        let codes = snapshot
            .punches
            .iter()
            .map(|p| p.employee_code.as_str())
            .chain(snapshot.missions.iter().map(|m| m.employee_code.as_str()))
            .chain(snapshot.leaves.iter().map(|l| l.employee_code.as_str()));

        let mut unknown: BTreeMap<&str, usize> = BTreeMap::new();
        for code in codes.filter(|code| !self.employees.contains_key(code)) {
            *unknown.entry(code).or_default() += 1;
        }

        for (employee_code, facts) in unknown {
            warn!(employee_code, facts, "Skipping facts for unknown employee");
        }
    }

    fn punches_on(&self, code: &'a str, date: NaiveDate) -> &[&'a Punch] {
        self.punches
            .get(&(code, date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn missions_on(&self, code: &'a str, date: NaiveDate) -> &[&'a Mission] {
        self.missions
            .get(&(code, date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn leaves_on(&self, code: &'a str, date: NaiveDate) -> Vec<&'a Leave> {
        self.leaves
            .get(code)
            .map(|leaves| {
                leaves
                    .iter()
                    .copied()
                    .filter(|leave| leave.covers(date))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn next_day_first_punch(&self, code: &'a str, date: NaiveDate) -> Option<NaiveDateTime> {
        let next = date.succ_opt()?;
        self.punches_on(code, next).first().map(|punch| punch.timestamp)
    }

    /// Every (employee, date) pair of a known employee touched by a fact,
    /// ordered by code then date.
    fn touched_days(&self, snapshot: &'a AttendanceSnapshot) -> BTreeSet<DayKey<'a>> {
        let punch_days = snapshot
            .punches
            .iter()
            .map(|p| (p.employee_code.as_str(), p.date()));
        let mission_days = snapshot
            .missions
            .iter()
            .map(|m| (m.employee_code.as_str(), m.date));
        let leave_days = snapshot.leaves.iter().flat_map(|leave| {
            let code = leave.employee_code.as_str();
            leave.dates().map(move |date| (code, date))
        });

        punch_days
            .chain(mission_days)
            .chain(leave_days)
            .filter(|(code, _)| self.employees.contains_key(code))
            .collect()
    }

    fn evaluate(
        &self,
        code: &'a str,
        date: NaiveDate,
        config: &EngineConfig,
    ) -> Option<DailyAttendance> {
        let employee = self.employees.get(code).copied()?;
        Some(evaluate_day(self, employee, date, config))
    }
}

fn evaluate_day<'a>(
    index: &SnapshotIndex<'a>,
    employee: &'a Employee,
    date: NaiveDate,
    config: &EngineConfig,
) -> DailyAttendance {
    let code = employee.code.as_str();

    let ctx = RuleContext::new(employee, date);
    let applied = get_applicable_rules(index.rules, &ctx, config);
    let effect = merge_effects(&applied, config);

    let shift = resolve_shift(employee, date, &effect, config);
    let missions = index.missions_on(code, date);
    let leaves = index.leaves_on(code, date);

    let mut stamps = resolve_stamps(index.punches_on(code, date), missions, &effect);
    stamps.apply_count_as_present(&shift, &effect);

    let suppression = penalty_suppression(date, !leaves.is_empty(), &effect, config);
    let penalties = calculate_penalties(
        stamps.check_in,
        stamps.check_out,
        &shift,
        suppression.suppressed,
        &effect,
        config,
    );
    let overtime = calculate_overtime(
        date,
        stamps.check_in,
        stamps.check_out,
        &shift,
        suppression.suppressed,
        &effect,
        index.next_day_first_punch(code, date),
    );

    let trace = AuditTraceBuilder::new()
        .rules(build_audit_rules(&applied))
        .leaves(&leaves)
        .shift(shift)
        .stamps(&stamps)
        .suppression(&suppression)
        .penalties(&penalties)
        .overtime(&overtime)
        .build();

    let mut logs = vec![
        format!("Processing {} on {}", code, date),
        format!(
            "Shift {}-{}, {} rule(s) applied",
            format_clock(shift.start),
            format_clock(shift.end),
            applied.len()
        ),
        format!(
            "Check-in {} ({}), check-out {} ({})",
            stamp_label(stamps.check_in),
            source_label(stamps.first_source),
            stamp_label(stamps.check_out),
            source_label(stamps.last_source)
        ),
        format!(
            "Deduction {} day(s), overtime {} hour(s)",
            penalties.total_deduction.normalize(),
            overtime.total_overtime.normalize()
        ),
    ];
    match trace.to_log_entry() {
        Ok(entry) => logs.push(entry),
        Err(err) => warn!(
            employee_code = code,
            date = %date,
            error = %err,
            "Failed to encode audit trace"
        ),
    }

    debug!(
        employee_code = code,
        date = %date,
        rules = applied.len(),
        total_deduction = %penalties.total_deduction,
        total_overtime = %overtime.total_overtime,
        "Evaluated attendance day"
    );

    DailyAttendance {
        id: None,
        employee_code: employee.code.clone(),
        date,
        first_punch: stamps.check_in,
        last_punch: stamps.check_out,
        shift_start: shift.start,
        shift_end: shift.end,
        is_absent: penalties.is_absent(),
        is_mission: !missions.is_empty(),
        is_leave: !leaves.is_empty(),
        is_weekend: config.is_weekend(date),
        suppress_penalties: suppression.suppressed,
        late_penalty: penalties.late_penalty,
        early_penalty: penalties.early_penalty,
        missing_punch_penalty: penalties.missing_punch_penalty,
        absence_penalty: penalties.absence_penalty,
        total_deduction: penalties.total_deduction,
        early_overtime: overtime.early_overtime,
        late_overtime: overtime.late_overtime,
        total_overtime: overtime.total_overtime,
        logs,
    }
}

fn stamp_label(stamp: Option<chrono::NaiveTime>) -> String {
    stamp.map(format_clock).unwrap_or_else(|| "-".to_string())
}

fn source_label(source: StampSource) -> &'static str {
    match source {
        StampSource::Biometric => "biometric",
        StampSource::Mission => "mission",
    }
}

fn sort_records(records: &mut [DailyAttendance]) {
    records.sort_by(|a, b| {
        a.employee_code
            .cmp(&b.employee_code)
            .then_with(|| a.date.cmp(&b.date))
    });
}

/// Computes a record for every (employee, date) pair touched by the snapshot.
///
/// A pair is touched by a punch or mission on that date, or by a leave whose
/// range covers it. Pairs without any such fact are not produced, and facts
/// for employee codes missing from the snapshot are skipped with a warning.
/// Records are sorted by employee code, then date, and carry no `id`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_attendance_records;
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{AttendanceSnapshot, Employee, Punch};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
/// let snapshot = AttendanceSnapshot {
///     employees: vec![Employee::new("EMP001", "Ahmed")],
///     punches: vec![
///         Punch::new("EMP001", day.and_hms_opt(8, 20, 0).unwrap()),
///         Punch::new("EMP001", day.and_hms_opt(16, 0, 0).unwrap()),
///     ],
///     ..AttendanceSnapshot::default()
/// };
///
/// let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].late_penalty, Decimal::new(25, 2));
/// ```
pub fn calculate_attendance_records(
    snapshot: &AttendanceSnapshot,
    config: &EngineConfig,
) -> Vec<DailyAttendance> {
    let run_id = Uuid::new_v4();
    let start_time = Instant::now();
    let index = SnapshotIndex::build(snapshot);

    let records: Vec<DailyAttendance> = index
        .touched_days(snapshot)
        .into_iter()
        .filter_map(|(code, date)| index.evaluate(code, date, config))
        .collect();

    info!(
        run_id = %run_id,
        records = records.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Attendance run completed"
    );
    records
}

/// Computes a record for every known employee on `target_date`.
///
/// Unlike [`calculate_attendance_records`], employees with no facts on the
/// date still get a record, so an employee who never showed up reads as
/// absent. Records are sorted by employee code.
pub fn calculate_attendance_for_date(
    snapshot: &AttendanceSnapshot,
    target_date: NaiveDate,
    config: &EngineConfig,
) -> Vec<DailyAttendance> {
    let run_id = Uuid::new_v4();
    let start_time = Instant::now();
    let index = SnapshotIndex::build(snapshot);

    let records: Vec<DailyAttendance> = index
        .employees
        .values()
        .copied()
        .map(|employee| evaluate_day(&index, employee, target_date, config))
        .collect();

    info!(
        run_id = %run_id,
        date = %target_date,
        records = records.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Attendance run for date completed"
    );
    records
}

/// Parallel form of [`calculate_attendance_records`].
///
/// Employees are evaluated concurrently; each employee's days run on one
/// worker. The output is identical to the sequential run.
pub fn calculate_attendance_records_parallel(
    snapshot: &AttendanceSnapshot,
    config: &EngineConfig,
) -> Vec<DailyAttendance> {
    let run_id = Uuid::new_v4();
    let start_time = Instant::now();
    let index = SnapshotIndex::build(snapshot);

    let mut by_employee: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for (code, date) in index.touched_days(snapshot) {
        by_employee.entry(code).or_default().push(date);
    }
    let partitions: Vec<(&str, Vec<NaiveDate>)> = by_employee.into_iter().collect();

    let mut records: Vec<DailyAttendance> = partitions
        .par_iter()
        .flat_map_iter(|(code, dates)| {
            let index = &index;
            dates
                .iter()
                .filter_map(move |date| index.evaluate(*code, *date, config))
        })
        .collect();
    sort_records(&mut records);

    info!(
        run_id = %run_id,
        records = records.len(),
        employees = partitions.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Parallel attendance run completed"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock::clock;
    use crate::models::{
        AttendanceExemptParams, CustomShiftParams, IgnoreBiometricParams, OvertimeKind,
        OvertimeOvernightParams, PenaltyCategory, RuleKind,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_punch(code: &str, s: &str) -> Punch {
        Punch::new(
            code,
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap(),
        )
    }

    fn make_leave(code: &str, start: &str, end: &str) -> Leave {
        Leave {
            employee_code: code.to_string(),
            start_date: make_date(start),
            end_date: make_date(end),
            leave_type: "annual".to_string(),
            details: None,
        }
    }

    fn base_snapshot() -> AttendanceSnapshot {
        AttendanceSnapshot {
            employees: vec![
                Employee::new("EMP002", "Sara Ali"),
                Employee::new("EMP001", "Ahmed Mohamed"),
            ],
            ..AttendanceSnapshot::default()
        }
    }

    fn find<'r>(records: &'r [DailyAttendance], code: &str, date: &str) -> &'r DailyAttendance {
        records
            .iter()
            .find(|r| r.employee_code == code && r.date == make_date(date))
            .unwrap()
    }

    #[test]
    fn test_regular_day() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 16:30:00"),
            make_punch("EMP001", "2025-12-15 07:58:00"),
        ];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, None);
        assert_eq!(record.first_punch, Some(clock(7, 58)));
        assert_eq!(record.last_punch, Some(clock(16, 30)));
        assert_eq!(record.total_deduction, Decimal::ZERO);
        assert_eq!(record.late_overtime, dec("0.5"));
        assert!(!record.is_weekend);

        let trace = record.audit_trace().unwrap();
        assert_eq!(trace.raw_punches.len(), 2);
        assert!(trace.has_overtime(OvertimeKind::Early));
        assert!(trace.has_overtime(OvertimeKind::Late));
        assert!(record.logs[0].starts_with("Processing EMP001"));
    }

    #[test]
    fn test_range_run_skips_days_without_facts() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 08:00:00"),
            make_punch("EMP002", "2025-12-16 08:00:00"),
        ];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let keys: Vec<(String, NaiveDate)> = records.iter().map(|r| r.key()).collect();
        assert_eq!(
            keys,
            vec![
                ("EMP001".to_string(), make_date("2025-12-15")),
                ("EMP002".to_string(), make_date("2025-12-16")),
            ]
        );
    }

    #[test]
    fn test_leave_touches_every_day_in_range() {
        let mut snapshot = base_snapshot();
        snapshot.leaves = vec![make_leave("EMP002", "2025-12-14", "2025-12-16")];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.is_leave);
            assert!(record.suppress_penalties);
            assert_eq!(record.total_deduction, Decimal::ZERO);
            assert!(!record.is_absent);
        }

        let trace = records[0].audit_trace().unwrap();
        assert_eq!(trace.applied_leaves, vec!["annual: 2025-12-14 - 2025-12-16"]);
    }

    #[test]
    fn test_unknown_employee_facts_are_skipped() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![make_punch("EMP404", "2025-12-15 08:00:00")];
        snapshot.leaves = vec![make_leave("EMP404", "2025-12-15", "2025-12-15")];

        assert!(calculate_attendance_records(&snapshot, &EngineConfig::default()).is_empty());
    }

    #[test]
    fn test_target_date_zero_fills_every_employee() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 08:00:00"),
            make_punch("EMP001", "2025-12-15 16:00:00"),
        ];

        let records = calculate_attendance_for_date(
            &snapshot,
            make_date("2025-12-15"),
            &EngineConfig::default(),
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_code, "EMP001");
        assert!(!records[0].is_absent);

        let absent = &records[1];
        assert_eq!(absent.employee_code, "EMP002");
        assert!(absent.is_absent);
        assert_eq!(absent.absence_penalty, dec("1"));
        let trace = absent.audit_trace().unwrap();
        assert_eq!(trace.penalties[0].category, PenaltyCategory::Absence);
    }

    #[test]
    fn test_friday_is_weekend_and_suppressed() {
        let snapshot = base_snapshot();
        let records = calculate_attendance_for_date(
            &snapshot,
            make_date("2025-12-19"),
            &EngineConfig::default(),
        );

        for record in &records {
            assert!(record.is_weekend);
            assert!(record.suppress_penalties);
            assert!(!record.is_absent);
            assert_eq!(record.total_deduction, Decimal::ZERO);
        }
    }

    #[test]
    fn test_saturday_shortened_shift_is_recorded() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-20 08:00:00"),
            make_punch("EMP001", "2025-12-20 14:00:00"),
        ];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let record = &records[0];

        assert!(record.is_weekend);
        assert!(!record.suppress_penalties);
        assert_eq!(record.shift_end, clock(14, 0));
        assert_eq!(record.early_penalty, Decimal::ZERO);
    }

    #[test]
    fn test_custom_shift_priority() {
        let day = make_date("2025-12-15");
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 10:00:00"),
            make_punch("EMP001", "2025-12-15 18:00:00"),
        ];
        snapshot.special_rules = vec![
            SpecialRule::new(
                "low",
                "Low",
                day,
                day,
                RuleKind::CustomShift(CustomShiftParams {
                    shift_start: Some(clock(7, 0)),
                    shift_end: Some(clock(15, 0)),
                }),
            )
            .with_priority(5),
            SpecialRule::new(
                "high",
                "High",
                day,
                day,
                RuleKind::CustomShift(CustomShiftParams {
                    shift_start: Some(clock(10, 0)),
                    shift_end: Some(clock(18, 0)),
                }),
            )
            .with_priority(10),
        ];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let record = &records[0];
        assert_eq!(record.shift_start, clock(10, 0));
        assert_eq!(record.shift_end, clock(18, 0));
        assert_eq!(record.total_deduction, Decimal::ZERO);

        let trace = record.audit_trace().unwrap();
        assert_eq!(trace.applied_rules[0].rule_id, "high");
        assert_eq!(trace.applied_rules[1].rule_id, "low");
    }

    #[test]
    fn test_ignore_biometric_makes_day_absent() {
        let day = make_date("2025-12-15");
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 08:00:00"),
            make_punch("EMP001", "2025-12-15 16:00:00"),
        ];
        snapshot.special_rules = vec![SpecialRule::new(
            "ignore",
            "Broken device",
            day,
            day,
            RuleKind::IgnoreBiometric(IgnoreBiometricParams::default()),
        )];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let record = &records[0];
        assert!(record.is_absent);
        assert_eq!(record.first_punch, None);

        let trace = record.audit_trace().unwrap();
        assert_eq!(trace.raw_punches.len(), 2);
        assert!(trace.notes.contains(&"Biometric ignored by rule".to_string()));
    }

    #[test]
    fn test_count_as_present_backfills_shift() {
        let day = make_date("2025-12-15");
        let mut snapshot = base_snapshot();
        snapshot.missions = vec![Mission {
            employee_code: "EMP001".to_string(),
            date: day,
            start_time: None,
            end_time: None,
            description: Some("Training".to_string()),
        }];
        snapshot.special_rules = vec![
            SpecialRule::new(
                "present",
                "Training day",
                day,
                day,
                RuleKind::AttendanceExempt(AttendanceExemptParams {
                    count_as_present: true,
                    exempt_penalties: false,
                }),
            )
            .scoped(crate::models::ScopeType::Employee, &["EMP001"]),
        ];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let record = &records[0];
        assert!(record.is_mission);
        assert_eq!(record.first_punch, Some(clock(8, 0)));
        assert_eq!(record.last_punch, Some(clock(16, 0)));
        assert_eq!(record.total_deduction, Decimal::ZERO);
        assert!(!record.suppress_penalties);
    }

    #[test]
    fn test_overnight_links_next_day_punch() {
        let mut snapshot = base_snapshot();
        snapshot.employees[1].shift_start = Some(clock(15, 0));
        snapshot.employees[1].shift_end = Some(clock(23, 0));
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 15:00:00"),
            make_punch("EMP001", "2025-12-15 22:30:00"),
            make_punch("EMP001", "2025-12-16 00:00:00"),
        ];
        snapshot.special_rules = vec![SpecialRule::new(
            "night",
            "Night shift",
            make_date("2025-12-01"),
            make_date("2025-12-31"),
            RuleKind::OvertimeOvernight(OvertimeOvernightParams {
                allow_next_day_checkout: true,
                max_overnight_hours: Some(dec("2")),
            }),
        )];

        let records = calculate_attendance_records(&snapshot, &EngineConfig::default());
        let record = find(&records, "EMP001", "2025-12-15");
        assert_eq!(record.late_overtime, dec("1"));

        let trace = record.audit_trace().unwrap();
        assert!(trace.has_overtime(OvertimeKind::Overnight));
        assert!(!trace.has_overtime(OvertimeKind::Late));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut snapshot = base_snapshot();
        snapshot.punches = vec![
            make_punch("EMP001", "2025-12-15 08:40:00"),
            make_punch("EMP001", "2025-12-15 15:00:00"),
            make_punch("EMP002", "2025-12-15 07:30:00"),
            make_punch("EMP002", "2025-12-16 09:10:00"),
        ];
        snapshot.leaves = vec![make_leave("EMP001", "2025-12-17", "2025-12-18")];

        let config = EngineConfig::default();
        let sequential = calculate_attendance_records(&snapshot, &config);
        let parallel = calculate_attendance_records_parallel(&snapshot, &config);

        assert_eq!(sequential.len(), 5);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_duplicate_employee_code_evaluated_once() {
        let mut snapshot = base_snapshot();
        snapshot.employees.push(Employee::new("EMP001", "Duplicate"));
        let records = calculate_attendance_for_date(
            &snapshot,
            make_date("2025-12-15"),
            &EngineConfig::default(),
        );
        assert_eq!(records.len(), 2);
    }
}
