//! The entry book: every time entry of the workstation, with id allocation,
//! editing and the filtered views used by `list`, `stats` and `export`.

use crate::errors::{AppError, AppResult};
use crate::models::app_config::AppConfig;
use crate::models::category::Category;
use crate::models::entry::{DEFAULT_PROJECT, EntryPatch, NewEntry, TimeEntry};
use crate::models::pay_period::PayPeriod;
use crate::utils::time::hours_between;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const ENTRIES_VERSION: &str = "2.0";

fn first_id() -> u64 {
    1
}

fn current_version() -> String {
    ENTRIES_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBook {
    #[serde(default)]
    entries: Vec<TimeEntry>,
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    last_update: Option<DateTime<Utc>>,
    #[serde(default = "current_version")]
    version: String,
}

impl Default for EntryBook {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: first_id(),
            last_update: None,
            version: current_version(),
        }
    }
}

/// Selection criteria shared by list, stats and export.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub employee: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<Category>,
    pub project: Option<String>,
}

impl EntryFilter {
    pub fn for_employee(name: &str) -> Self {
        Self {
            employee: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Narrow the date range to the pay period.
    pub fn within_period(mut self, period: &PayPeriod) -> Self {
        self.from = Some(match self.from {
            Some(d) => d.max(period.period_start),
            None => period.period_start,
        });
        self.to = Some(match self.to {
            Some(d) => d.min(period.period_end),
            None => period.period_end,
        });
        self
    }

    pub fn matches(&self, e: &TimeEntry) -> bool {
        if let Some(name) = &self.employee
            && !e.employee_name.eq_ignore_ascii_case(name.trim())
        {
            return false;
        }
        if let Some(from) = self.from
            && e.date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && e.date > to
        {
            return false;
        }
        if let Some(cat) = self.category
            && e.category != cat
        {
            return false;
        }
        if let Some(project) = &self.project
            && !e.project.eq_ignore_ascii_case(project.trim())
        {
            return false;
        }
        true
    }
}

/// Per-day aggregate for the daily summary view.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub entries: usize,
    pub projects: BTreeSet<String>,
}

impl EntryBook {
    /// Keep `next_id` ahead of every stored id, even if the blob was edited
    /// by hand.
    pub fn repaired(mut self) -> Self {
        let max_id = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            self.next_id = max_id + 1;
        }
        self
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_update = Some(now);
    }

    pub fn add(&mut self, new: NewEntry, now: DateTime<Utc>) -> &TimeEntry {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(TimeEntry::from_new(id, new, now));
        self.touch(now);
        &self.entries[self.entries.len() - 1]
    }

    /// Apply the fields present in `patch`.
    ///
    /// When the clock times change and no duration is given, the duration is
    /// recomputed from the new times.
    pub fn update(&mut self, id: u64, patch: EntryPatch, now: DateTime<Utc>) -> AppResult<&TimeEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(AppError::EntryNotFound(id))?;

        let times_changed = patch.start_time.is_some() || patch.end_time.is_some();
        let e = &mut self.entries[idx];

        if let Some(date) = patch.date {
            e.date = date;
        }
        if let Some(category) = patch.category {
            e.category = category;
        }
        if let Some(project) = patch.project {
            let project = project.trim();
            e.project = if project.is_empty() {
                DEFAULT_PROJECT.to_string()
            } else {
                project.to_string()
            };
        }
        if let Some(start) = patch.start_time {
            e.start_time = Some(start);
        }
        if let Some(end) = patch.end_time {
            e.end_time = Some(end);
        }
        if let Some(description) = patch.description {
            e.description = description;
        }

        match patch.duration_hours {
            Some(h) => e.duration_hours = h.max(0.0),
            None if times_changed => {
                if let (Some(start), Some(end)) = (e.start_time, e.end_time) {
                    e.duration_hours = hours_between(start, end);
                }
            }
            None => {}
        }

        e.timestamp = now;
        self.last_update = Some(now);
        Ok(&self.entries[idx])
    }

    pub fn delete(&mut self, id: u64) -> AppResult<TimeEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(AppError::EntryNotFound(id))?;
        Ok(self.entries.remove(idx))
    }

    /// Remove every entry. Ids keep counting from where they were.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Keep only the entries for which `keep` holds; returns how many went.
    pub fn retain<F: FnMut(&TimeEntry) -> bool>(&mut self, keep: F) -> usize {
        let before = self.entries.len();
        self.entries.retain(keep);
        before - self.entries.len()
    }

    /// Matching entries, newest date first, then newest timestamp first.
    pub fn filter(&self, filter: &EntryFilter) -> Vec<&TimeEntry> {
        let mut out: Vec<&TimeEntry> = self.entries.iter().filter(|e| filter.matches(e)).collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));
        out
    }

    pub fn daily_summary(&self, filter: &EntryFilter) -> Vec<DaySummary> {
        let mut days: Vec<DaySummary> = Vec::new();

        for e in self.filter(filter) {
            match days.last_mut() {
                Some(day) if day.date == e.date => {
                    day.total_hours += e.duration_hours;
                    day.entries += 1;
                    day.projects.insert(e.project.clone());
                }
                _ => days.push(DaySummary {
                    date: e.date,
                    total_hours: e.duration_hours,
                    entries: 1,
                    projects: BTreeSet::from([e.project.clone()]),
                }),
            }
        }

        days
    }

    pub fn employees(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.employee_name.clone()).collect()
    }

    pub fn projects(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.project.clone()).collect()
    }

    pub fn categories(&self) -> BTreeSet<Category> {
        self.entries.iter().map(|e| e.category).collect()
    }
}

/// Editing is open to employees only when both edit toggles are on.
pub fn check_edit_allowed(cfg: &AppConfig, is_admin: bool) -> AppResult<()> {
    if is_admin || (cfg.allow_edit && cfg.allow_employee_edit) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(
            "editing entries is disabled by the administrator".into(),
        ))
    }
}

pub fn check_delete_allowed(cfg: &AppConfig, is_admin: bool) -> AppResult<()> {
    if is_admin || (cfg.allow_delete && cfg.allow_employee_delete) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(
            "deleting entries is disabled by the administrator".into(),
        ))
    }
}
