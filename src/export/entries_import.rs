//! Reading time entries from CSV and JSON files.

use crate::core::entries::EntryBook;
use crate::core::validation::ValidationLogic;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::entry::{DEFAULT_PROJECT, NewEntry, TimeEntry};
use crate::models::source::EntrySource;
use crate::utils::date::parse_date;
use crate::utils::formatting::split_camel_case;
use crate::utils::path::extension;
use crate::utils::time::{hours_between, parse_time};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

pub const UNKNOWN_EMPLOYEE: &str = "Unknown";

/// A row that could not be turned into an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub duplicates: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Column positions found in the header row.
#[derive(Debug, Default, Clone, Copy)]
struct ColumnMap {
    employee: Option<usize>,
    date: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
    category: Option<usize>,
    project: Option<usize>,
    duration: Option<usize>,
    description: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = ColumnMap::default();

        for (idx, raw) in headers.iter().enumerate() {
            let h = raw.trim().to_ascii_lowercase();
            let slot = if h.contains("employee") || h == "name" {
                &mut map.employee
            } else if h.contains("date") {
                &mut map.date
            } else if h.contains("start") {
                &mut map.start
            } else if h.contains("end") {
                &mut map.end
            } else if h.contains("category") || h == "type" {
                &mut map.category
            } else if h.contains("project") {
                &mut map.project
            } else if h.contains("duration") || h.contains("hours") {
                &mut map.duration
            } else if h.contains("description") {
                &mut map.description
            } else {
                continue;
            };
            slot.get_or_insert(idx);
        }

        map
    }
}

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^-_]+)[-_]").unwrap())
}

/// `JohnDoe-TimeSheet.csv` → `John Doe`.
pub fn employee_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let caps = filename_regex().captures(&name)?;
    let employee = split_camel_case(caps.get(1)?.as_str());
    if employee.is_empty() { None } else { Some(employee) }
}

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

fn parse_row(
    record: &csv::StringRecord,
    map: &ColumnMap,
    fallback_employee: &str,
) -> Result<NewEntry, String> {
    let employee = match cell(record, map.employee) {
        "" => fallback_employee.to_string(),
        name => name.to_string(),
    };

    let raw_date = cell(record, map.date);
    let date = parse_date(raw_date).ok_or_else(|| format!("invalid date '{raw_date}'"))?;

    let category = match cell(record, map.category) {
        "" => Category::Work,
        raw => Category::from_code(raw).ok_or_else(|| format!("unknown category '{raw}'"))?,
    };

    let project = match cell(record, map.project) {
        "" => DEFAULT_PROJECT.to_string(),
        p => p.to_string(),
    };

    let start_time = match cell(record, map.start) {
        "" => None,
        raw => Some(parse_time(raw).ok_or_else(|| format!("invalid start time '{raw}'"))?),
    };
    let end_time = match cell(record, map.end) {
        "" => None,
        raw => Some(parse_time(raw).ok_or_else(|| format!("invalid end time '{raw}'"))?),
    };

    let computed = match (start_time, end_time) {
        (Some(s), Some(e)) => Some(hours_between(s, e)),
        _ => None,
    };
    let given = cell(record, map.duration)
        .trim_end_matches(['h', 'H'])
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite());
    let duration_hours = given
        .or(computed)
        .ok_or_else(|| "no duration and no start/end times".to_string())?
        .max(0.0);

    Ok(NewEntry {
        employee_name: employee,
        date,
        category,
        project,
        start_time,
        end_time,
        duration_hours,
        description: cell(record, map.description).to_string(),
        source: EntrySource::Import,
    })
}

/// Parse an entry CSV. Bad rows are returned separately with their line number.
pub fn read_entries_csv<R: Read>(
    input: R,
    fallback_employee: &str,
) -> AppResult<(Vec<NewEntry>, Vec<SkippedRow>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = rdr.headers()?.clone();
    let map = ColumnMap::from_headers(&headers);
    if map.date.is_none() {
        return Err(AppError::Import("no Date column in header".into()));
    }

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if record.len() < headers.len() {
            skipped.push(SkippedRow {
                line,
                reason: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
            continue;
        }

        match parse_row(&record, &map, fallback_employee) {
            Ok(entry) => entries.push(entry),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok((entries, skipped))
}

/// JSON shapes accepted on import: our own export (a bare array or an
/// `{entries}` blob) and the browser tool's `{allEntries}` dump.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesJson {
    List(Vec<TimeEntry>),
    Book {
        entries: Vec<TimeEntry>,
    },
    #[serde(rename_all = "camelCase")]
    Legacy {
        all_entries: Vec<LegacyEntry>,
    },
}

/// Entry as stored by the browser tool.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEntry {
    #[serde(alias = "employee")]
    employee_name: String,
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    project: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default, alias = "duration")]
    duration_hours: f64,
    #[serde(default)]
    description: String,
}

impl LegacyEntry {
    fn into_new(self) -> Result<NewEntry, String> {
        let date = parse_date(&self.date).ok_or_else(|| format!("invalid date '{}'", self.date))?;
        let category = match self.category.trim() {
            "" => Category::Work,
            raw => Category::from_code(raw).ok_or_else(|| format!("unknown category '{raw}'"))?,
        };

        Ok(NewEntry {
            employee_name: self.employee_name,
            date,
            category,
            project: self.project,
            start_time: parse_time(&self.start_time),
            end_time: parse_time(&self.end_time),
            duration_hours: self.duration_hours.max(0.0),
            description: self.description,
            source: EntrySource::Import,
        })
    }
}

fn into_new(e: TimeEntry) -> NewEntry {
    NewEntry {
        employee_name: e.employee_name,
        date: e.date,
        category: e.category,
        project: e.project,
        start_time: e.start_time,
        end_time: e.end_time,
        duration_hours: e.duration_hours,
        description: e.description,
        source: EntrySource::Import,
    }
}

pub fn read_entries_json(text: &str) -> AppResult<(Vec<NewEntry>, Vec<SkippedRow>)> {
    let parsed: EntriesJson =
        serde_json::from_str(text).map_err(|e| AppError::Import(format!("unrecognized JSON: {e}")))?;

    Ok(match parsed {
        EntriesJson::List(entries) | EntriesJson::Book { entries } => {
            (entries.into_iter().map(into_new).collect(), Vec::new())
        }
        EntriesJson::Legacy { all_entries } => {
            let mut out = Vec::new();
            let mut skipped = Vec::new();
            for (idx, legacy) in all_entries.into_iter().enumerate() {
                match legacy.into_new() {
                    Ok(e) => out.push(e),
                    Err(reason) => skipped.push(SkippedRow {
                        line: idx as u64 + 1,
                        reason,
                    }),
                }
            }
            (out, skipped)
        }
    })
}

pub struct ImportLogic;

impl ImportLogic {
    /// Add parsed entries to the book, skipping rows already present.
    pub fn merge(
        book: &mut EntryBook,
        parsed: Vec<NewEntry>,
        skipped: Vec<SkippedRow>,
        now: DateTime<Utc>,
    ) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            skipped,
            ..ImportOutcome::default()
        };

        for entry in parsed {
            if ValidationLogic::is_duplicate(&entry, book.entries()) {
                outcome.duplicates += 1;
            } else {
                book.add(entry, now);
                outcome.added += 1;
            }
        }

        outcome
    }

    /// Import a `.csv` or `.json` file into the book.
    ///
    /// Rows without an employee take `employee`, else the name in the file
    /// name, else `Unknown`. With an `owner`, every row must belong to that
    /// employee or nothing is imported.
    pub fn import_file(
        book: &mut EntryBook,
        path: &Path,
        employee: Option<&str>,
        owner: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<ImportOutcome> {
        let (parsed, skipped) = if extension(path) == "json" {
            read_entries_json(&fs::read_to_string(path)?)?
        } else {
            let fallback = employee
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .or_else(|| employee_from_filename(path))
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
            read_entries_csv(fs::File::open(path)?, &fallback)?
        };

        if let Some(owner) = owner
            && let Some(foreign) = parsed
                .iter()
                .find(|e| !e.employee_name.eq_ignore_ascii_case(owner))
        {
            return Err(AppError::PermissionDenied(format!(
                "importing entries for {} requires admin access",
                foreign.employee_name
            )));
        }

        Ok(Self::merge(book, parsed, skipped, now))
    }
}
