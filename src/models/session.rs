//! Class session assignment model, used for attendance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled session and the employees assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAssignment {
    /// Session identifier, matched against `sessionId` on time entries.
    pub id: String,
    /// The day the session runs.
    pub date: NaiveDate,
    /// Employees expected to work the session.
    #[serde(default)]
    pub assigned_employee_ids: Vec<String>,
}

impl SessionAssignment {
    /// Returns true if the employee is assigned to this session.
    pub fn is_assigned(&self, employee_id: &str) -> bool {
        self.assigned_employee_ids.iter().any(|id| id == employee_id)
    }
}
