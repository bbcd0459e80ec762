use crate::models::category::Category;
use crate::models::source::EntrySource;
use crate::utils::time::serde_hhmm;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT: &str = "No Project";

/// A single recorded block of time for one employee on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: u64,
    pub employee_name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub project: String,
    #[serde(with = "serde_hhmm", default)]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "serde_hhmm", default)]
    pub end_time: Option<NaiveTime>,
    pub duration_hours: f64,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub source: EntrySource,
}

/// Field values for an entry that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub employee_name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub project: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_hours: f64,
    pub description: String,
    pub source: EntrySource,
}

/// Partial update applied by `edit`.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub project: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_hours: Option<f64>,
    pub description: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.project.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.duration_hours.is_none()
            && self.description.is_none()
    }
}

impl TimeEntry {
    pub fn from_new(id: u64, new: NewEntry, timestamp: DateTime<Utc>) -> Self {
        let project = if new.project.trim().is_empty() {
            DEFAULT_PROJECT.to_string()
        } else {
            new.project.trim().to_string()
        };

        Self {
            id,
            employee_name: new.employee_name.trim().to_string(),
            date: new.date,
            category: new.category,
            project,
            start_time: new.start_time,
            end_time: new.end_time,
            duration_hours: new.duration_hours.max(0.0),
            description: new.description,
            timestamp,
            source: new.source,
        }
    }

    /// Required fields present and `0 < duration <= 24`.
    pub fn is_valid(&self) -> bool {
        !self.employee_name.trim().is_empty()
            && self.start_time.is_some()
            && self.end_time.is_some()
            && self.duration_hours > 0.0
            && self.duration_hours <= 24.0
    }

    /// Two entries for the same employee, day and clock span are the same work.
    pub fn same_span(&self, other: &NewEntry) -> bool {
        self.employee_name == other.employee_name.trim()
            && self.date == other.date
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }
}
