use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remembered identity of whoever uses this workstation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSettings {
    pub employee_name: String,
    pub last_updated: DateTime<Utc>,
}
