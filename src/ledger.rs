//! In-memory store of computed attendance records.
//!
//! The engine produces records without identifiers. The [`AttendanceLedger`]
//! assigns each (employee code, date) key a UUID the first time it is saved
//! and keeps that UUID when the key is recomputed and saved again.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DailyAttendance, YearMonth};

/// Attendance records keyed by (employee code, date).
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_attendance_for_date;
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::ledger::AttendanceLedger;
/// use attendance_engine::models::{AttendanceSnapshot, Employee};
/// use chrono::NaiveDate;
///
/// let snapshot = AttendanceSnapshot {
///     employees: vec![Employee::new("EMP001", "Ahmed")],
///     ..AttendanceSnapshot::default()
/// };
/// let day = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
/// let config = EngineConfig::default();
///
/// let mut ledger = AttendanceLedger::new();
/// ledger.save(calculate_attendance_for_date(&snapshot, day, &config));
/// let first_id = ledger.get("EMP001", day).unwrap().id;
///
/// ledger.save(calculate_attendance_for_date(&snapshot, day, &config));
/// assert_eq!(ledger.get("EMP001", day).unwrap().id, first_id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    records: BTreeMap<(String, NaiveDate), DailyAttendance>,
}

impl AttendanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts `records` by key.
    ///
    /// A record replacing an existing key takes over that key's id; a record
    /// for a new key gets a fresh UUID v4. Returns the number of new keys.
    pub fn save(&mut self, records: impl IntoIterator<Item = DailyAttendance>) -> usize {
        let mut inserted = 0;
        let mut updated = 0;

        for mut record in records {
            let key = record.key();
            match self.records.get(&key).and_then(|existing| existing.id) {
                Some(id) => {
                    record.id = Some(id);
                    updated += 1;
                }
                None => {
                    record.id = Some(Uuid::new_v4());
                    inserted += 1;
                }
            }
            self.records.insert(key, record);
        }

        debug!(inserted, updated, "Saved attendance records");
        inserted
    }

    /// Stored records sorted by employee code then date, optionally limited
    /// to one month.
    pub fn records(&self, month: Option<YearMonth>) -> Vec<&DailyAttendance> {
        self.records
            .values()
            .filter(|record| month.is_none_or(|month| month.contains(record.date)))
            .collect()
    }

    /// Looks up the record for `employee_code` on `date`.
    pub fn get(&self, employee_code: &str, date: NaiveDate) -> Option<&DailyAttendance> {
        self.records.get(&(employee_code.to_string(), date))
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
