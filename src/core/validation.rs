//! Data-quality checks run by the admin `validate` and `clean` commands and
//! by import.

use crate::core::entries::EntryBook;
use crate::models::entry::{NewEntry, TimeEntry};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub total: usize,
    /// Valid and not a duplicate.
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
    pub invalid_ids: Vec<u64>,
    pub duplicate_ids: Vec<u64>,
}

impl ValidationReport {
    /// Percentage of entries that are valid and unique; 100 for an empty book.
    pub fn quality_pct(&self) -> u32 {
        if self.total == 0 {
            100
        } else {
            ((self.valid as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

type StartKey = (String, NaiveDate, Option<NaiveTime>);
type SpanKey = (String, NaiveDate, Option<NaiveTime>, Option<NaiveTime>);

fn start_key(e: &TimeEntry) -> StartKey {
    (e.employee_name.clone(), e.date, e.start_time)
}

fn span_key(e: &TimeEntry) -> SpanKey {
    (e.employee_name.clone(), e.date, e.start_time, e.end_time)
}

pub struct ValidationLogic;

impl ValidationLogic {
    /// Ids of entries sharing employee, date and start time with an earlier
    /// entry. The first occurrence is the original.
    pub fn duplicate_ids(entries: &[TimeEntry]) -> HashSet<u64> {
        let mut seen: HashSet<StartKey> = HashSet::new();
        entries
            .iter()
            .filter(|e| !seen.insert(start_key(e)))
            .map(|e| e.id)
            .collect()
    }

    pub fn validate(entries: &[TimeEntry]) -> ValidationReport {
        let dups = Self::duplicate_ids(entries);
        let mut report = ValidationReport {
            total: entries.len(),
            ..ValidationReport::default()
        };

        for e in entries {
            let is_dup = dups.contains(&e.id);
            if is_dup {
                report.duplicates += 1;
                report.duplicate_ids.push(e.id);
            }
            if !e.is_valid() {
                report.invalid += 1;
                report.invalid_ids.push(e.id);
            } else if !is_dup {
                report.valid += 1;
            }
        }

        report
    }

    /// Remove zero-duration entries, then exact span duplicates.
    ///
    /// Returns `(zero_duration_removed, duplicates_removed)`.
    pub fn clean(book: &mut EntryBook) -> (usize, usize) {
        let zero = book.retain(|e| e.duration_hours > 0.0);

        let mut seen: HashSet<SpanKey> = HashSet::new();
        let dups = book.retain(|e| seen.insert(span_key(e)));

        (zero, dups)
    }

    /// An incoming row equal to an entry already in the book.
    pub fn is_duplicate(new: &NewEntry, existing: &[TimeEntry]) -> bool {
        existing.iter().any(|e| e.same_span(new))
    }
}
