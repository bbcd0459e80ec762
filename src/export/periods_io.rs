//! Pay period tables as CSV or JSON files.

use crate::errors::{AppError, AppResult};
use crate::export::entries_import::SkippedRow;
use crate::models::pay_period::{PayPeriod, PayPeriodTable, RawPayPeriods};
use crate::utils::date::parse_date;
use crate::utils::path::{extension, file_stem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

pub const PAY_PERIOD_HEADERS: [&str; 6] = [
    "ID",
    "Description",
    "Period Start",
    "Period End",
    "Timesheet Due",
    "Pay Day",
];

pub const PAY_PERIOD_TEMPLATE: &str = "\
ID,Description,Period Start,Period End,Timesheet Due,Pay Day
2025-01,\"Pay Period 1 - Jan 1-15 2025\",2025-01-01,2025-01-15,2025-01-15,2025-01-22
2025-02,\"Pay Period 2 - Jan 16-31 2025\",2025-01-16,2025-01-31,2025-01-31,2025-02-07
2025-03,\"Pay Period 3 - Feb 1-15 2025\",2025-02-01,2025-02-15,2025-02-15,2025-02-22
";

/// Version stamped into JSON exports.
pub const EXPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wrapper written by `periods export --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayPeriodsExport<'a> {
    version: &'a str,
    export_date: DateTime<Utc>,
    pay_periods_config: &'a PayPeriodTable,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PayPeriodsJson {
    Wrapped {
        #[serde(rename = "payPeriodsConfig")]
        pay_periods_config: RawPayPeriods,
    },
    Bare(RawPayPeriods),
}

pub fn read_periods_csv<R: Read>(input: R) -> AppResult<(Vec<PayPeriod>, Vec<SkippedRow>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut periods = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < PAY_PERIOD_HEADERS.len() {
            if !record.iter().all(str::is_empty) {
                skipped.push(SkippedRow {
                    line,
                    reason: format!("expected 6 fields, found {}", record.len()),
                });
            }
            continue;
        }

        let date = |idx: usize| {
            parse_date(&record[idx]).ok_or_else(|| format!("invalid date '{}'", &record[idx]))
        };

        let row = (|| -> Result<PayPeriod, String> {
            Ok(PayPeriod {
                id: record[0].to_string(),
                description: record[1].to_string(),
                period_start: date(2)?,
                period_end: date(3)?,
                timesheet_due: date(4)?,
                pay_day: date(5)?,
            })
        })();

        match row {
            Ok(p) => periods.push(p),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok((periods, skipped))
}

pub fn read_periods_json(text: &str) -> AppResult<Vec<PayPeriod>> {
    let parsed: PayPeriodsJson = serde_json::from_str(text)
        .map_err(|e| AppError::Import(format!("not a pay periods file: {e}")))?;

    Ok(match parsed {
        PayPeriodsJson::Wrapped { pay_periods_config } => pay_periods_config.pay_periods,
        PayPeriodsJson::Bare(raw) => raw.pay_periods,
    })
}

/// Load a replacement table. The configuration name is the file stem.
pub fn load_periods_file(path: &Path) -> AppResult<(PayPeriodTable, String, Vec<SkippedRow>)> {
    let (periods, skipped) = if extension(path) == "csv" {
        read_periods_csv(fs::File::open(path)?)?
    } else {
        (read_periods_json(&fs::read_to_string(path)?)?, Vec::new())
    };

    if periods.is_empty() {
        return Err(AppError::Import(format!(
            "no valid pay periods found in {}",
            path.display()
        )));
    }

    Ok((PayPeriodTable::new(periods)?, file_stem(path), skipped))
}

pub fn write_periods_csv<W: Write>(out: W, table: &PayPeriodTable) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(PAY_PERIOD_HEADERS)?;

    for p in table.periods() {
        wtr.write_record([
            p.id.clone(),
            p.description.clone(),
            p.period_start.to_string(),
            p.period_end.to_string(),
            p.timesheet_due.to_string(),
            p.pay_day.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn periods_json(table: &PayPeriodTable, now: DateTime<Utc>) -> AppResult<String> {
    let export = PayPeriodsExport {
        version: EXPORT_VERSION,
        export_date: now,
        pay_periods_config: table,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
