//! The input snapshot a calculation run reads from.

use serde::{Deserialize, Serialize};

use super::adjustment::{Leave, Mission};
use super::employee::Employee;
use super::punch::Punch;
use super::special_rule::SpecialRule;

/// An immutable snapshot of every fact a calculation run needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    /// Known employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Raw biometric punches.
    #[serde(default)]
    pub punches: Vec<Punch>,
    /// Missions.
    #[serde(default)]
    pub missions: Vec<Mission>,
    /// Leaves.
    #[serde(default)]
    pub leaves: Vec<Leave>,
    /// Configured special rules.
    #[serde(default)]
    pub special_rules: Vec<SpecialRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserializes_with_missing_collections() {
        let json = r#"{
            "employees": [{"code": "EMP001", "name": "Ahmed"}],
            "punches": [{"employee_code": "EMP001", "timestamp": "2025-12-15T08:05:00"}]
        }"#;

        let snapshot: AttendanceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.punches.len(), 1);
        assert!(snapshot.missions.is_empty());
        assert!(snapshot.leaves.is_empty());
        assert!(snapshot.special_rules.is_empty());
    }
}
