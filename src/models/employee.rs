//! Employee model.
//!
//! Employees are imported from master-data spreadsheets by an upstream
//! collaborator and are read-only for the duration of a calculation run.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::clock::hhmm_option;

/// Represents an employee whose attendance is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, stable employee code used to key every other fact.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Department name, matched by department-scoped rules.
    #[serde(default)]
    pub department: Option<String>,
    /// Branch name, matched by branch-scoped rules.
    #[serde(default)]
    pub branch: Option<String>,
    /// Job title. Drives the Saturday shortening for auxiliary services.
    #[serde(default)]
    pub job: Option<String>,
    /// Configured shift start, if any.
    #[serde(default, with = "hhmm_option")]
    pub shift_start: Option<NaiveTime>,
    /// Configured shift end, if any.
    #[serde(default, with = "hhmm_option")]
    pub shift_end: Option<NaiveTime>,
}

impl Employee {
    /// Creates an employee with only a code and name set.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    ///
    /// let employee = Employee::new("EMP001", "Ahmed Mohamed");
    /// assert_eq!(employee.code, "EMP001");
    /// assert!(employee.department.is_none());
    /// ```
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department: None,
            branch: None,
            job: None,
            shift_start: None,
            shift_end: None,
        }
    }

    /// Returns the department when it is set and not blank.
    pub fn department(&self) -> Option<&str> {
        non_blank(self.department.as_deref())
    }

    /// Returns the branch when it is set and not blank.
    pub fn branch(&self) -> Option<&str> {
        non_blank(self.branch.as_deref())
    }

    /// Returns true if the job title contains `marker`.
    pub fn job_contains(&self, marker: &str) -> bool {
        self.job.as_deref().is_some_and(|job| job.contains(marker))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
