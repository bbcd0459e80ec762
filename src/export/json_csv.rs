use crate::errors::{AppError, AppResult};
use crate::export::model::EntryRow;
use crate::export::notify_export_success;
use crate::models::entry::TimeEntry;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed, full entry records.
pub(crate) fn export_json(entries: &[&TimeEntry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(entries)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV (header written by serde from the `EntryRow` field names).
pub(crate) fn export_csv(rows: &[EntryRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = File::create(path)?;
    write_entries_csv(file, rows)?;

    notify_export_success("CSV", path);
    Ok(())
}

pub fn write_entries_csv<W: Write>(out: W, rows: &[EntryRow]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    if rows.is_empty() {
        wtr.write_record(crate::export::model::ENTRY_HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
