use crate::models::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A running timer, persisted between invocations until it is stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub employee_name: String,
    pub category: Category,
    pub project: String,
    pub started_at: DateTime<Utc>,
}
