//! Holiday calendars as CSV or JSON files.

use crate::errors::{AppError, AppResult};
use crate::export::entries_import::SkippedRow;
use crate::models::holiday::{Holiday, HolidayCalendar};
use crate::utils::date::parse_date;
use crate::utils::path::{extension, file_stem};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

pub const HOLIDAY_HEADERS: [&str; 5] = ["ID", "Date", "Name", "Type", "Description"];

pub const HOLIDAY_TEMPLATE: &str = "\
ID,Date,Name,Type,Description
2025-new-years,2025-01-01,New Year's Day,federal,Federal Holiday - New Year's Day
2025-mlk,2025-01-20,Martin Luther King Jr. Day,federal,Federal Holiday - MLK Day
2025-company-day,2025-03-15,Company Appreciation Day,company,Company Holiday - Employee Appreciation
";

#[derive(Deserialize)]
#[serde(untagged)]
enum HolidaysJson {
    Wrapped {
        #[serde(rename = "holidaysConfig")]
        holidays_config: HolidayCalendar,
    },
    Bare(HolidayCalendar),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HolidaysExport<'a> {
    version: &'a str,
    holidays_config: &'a HolidayCalendar,
}

/// Rows need ID, date, name and type; a missing description repeats the name.
pub fn read_holidays_csv<R: Read>(input: R) -> AppResult<(Vec<Holiday>, Vec<SkippedRow>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut holidays = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < 4 {
            if !record.iter().all(str::is_empty) {
                skipped.push(SkippedRow {
                    line,
                    reason: format!("expected at least 4 fields, found {}", record.len()),
                });
            }
            continue;
        }

        let Some(date) = parse_date(&record[1]) else {
            skipped.push(SkippedRow {
                line,
                reason: format!("invalid date '{}'", &record[1]),
            });
            continue;
        };

        holidays.push(
            Holiday {
                id: record[0].to_string(),
                date,
                name: record[2].to_string(),
                holiday_type: record[3].to_string(),
                description: record.get(4).unwrap_or("").to_string(),
            }
            .normalized(),
        );
    }

    Ok((holidays, skipped))
}

pub fn read_holidays_json(text: &str) -> AppResult<Vec<Holiday>> {
    let parsed: HolidaysJson = serde_json::from_str(text)
        .map_err(|e| AppError::Import(format!("not a holidays file: {e}")))?;

    Ok(match parsed {
        HolidaysJson::Wrapped { holidays_config } => holidays_config.holidays,
        HolidaysJson::Bare(calendar) => calendar.holidays,
    })
}

/// Load a replacement calendar. The configuration name is the file stem.
pub fn load_holidays_file(path: &Path) -> AppResult<(HolidayCalendar, String, Vec<SkippedRow>)> {
    let (holidays, skipped) = if extension(path) == "csv" {
        read_holidays_csv(fs::File::open(path)?)?
    } else {
        (read_holidays_json(&fs::read_to_string(path)?)?, Vec::new())
    };

    if holidays.is_empty() {
        return Err(AppError::Import(format!(
            "no valid holidays found in {}",
            path.display()
        )));
    }

    Ok((HolidayCalendar::new(holidays), file_stem(path), skipped))
}

pub fn write_holidays_csv<W: Write>(out: W, calendar: &HolidayCalendar) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HOLIDAY_HEADERS)?;

    for h in &calendar.holidays {
        wtr.write_record([
            h.id.as_str(),
            h.date.to_string().as_str(),
            h.name.as_str(),
            h.holiday_type.as_str(),
            h.description.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn holidays_json(calendar: &HolidayCalendar) -> AppResult<String> {
    let export = HolidaysExport {
        version: crate::export::periods_io::EXPORT_VERSION,
        holidays_config: calendar,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
