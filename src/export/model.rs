use crate::models::entry::TimeEntry;
use crate::utils::time::format_optional_hhmm;
use serde::{Deserialize, Serialize};

/// Column order of the entry CSV.
pub const ENTRY_HEADERS: [&str; 8] = [
    "Employee",
    "Date",
    "Category",
    "Project",
    "Start Time",
    "End Time",
    "Duration",
    "Description",
];

/// Flat, string-typed view of an entry for CSV / XLSX.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntryRow {
    #[serde(rename = "Employee")]
    pub employee: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<&TimeEntry> for EntryRow {
    fn from(e: &TimeEntry) -> Self {
        Self {
            employee: e.employee_name.clone(),
            date: e.date.format("%Y-%m-%d").to_string(),
            category: e.category.as_str().to_string(),
            project: e.project.clone(),
            start_time: format_optional_hhmm(e.start_time),
            end_time: format_optional_hhmm(e.end_time),
            duration: format!("{:.2}", e.duration_hours),
            description: e.description.clone(),
        }
    }
}

impl EntryRow {
    pub(crate) fn cells(&self) -> [&str; 8] {
        [
            &self.employee,
            &self.date,
            &self.category,
            &self.project,
            &self.start_time,
            &self.end_time,
            &self.duration,
            &self.description,
        ]
    }
}
