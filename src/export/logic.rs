use crate::core::entries::{EntryBook, EntryFilter};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryRow;
use crate::export::notify_export_success;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::fs;
use std::path::Path;

/// Six rows in the layout most timesheet exports use. The `Training` row
/// has no matching category and is skipped on import.
pub const SAMPLE_TIMESHEET: &str = "\
Employee Name,Date,Category,Project,Start Time,End Time,Duration (Hours)
John Doe,2025-01-15,Work,Project Alpha,09:00,12:00,3.0
John Doe,2025-01-15,Work,Project Alpha,13:00,17:30,4.5
Jane Smith,2025-01-15,Overhead,Admin Tasks,08:30,10:30,2.0
Jane Smith,2025-01-15,Training,Python Course,10:30,12:00,1.5
Bob Johnson,2025-01-16,Travel,Client Visit,07:00,11:00,4.0
Bob Johnson,2025-01-16,Work,Project Beta,13:00,18:00,5.0
";

/// High-level export of time entries.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the entries matching `filter`, oldest first.
    ///
    /// Returns the number of entries written.
    pub fn export(
        book: &EntryBook,
        filter: &EntryFilter,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if path.as_os_str().is_empty() {
            return Err(AppError::Export("output file path is empty".into()));
        }

        let mut entries = book.filter(filter);
        if entries.is_empty() {
            warning("No entries found for the selected filter.");
            return Ok(0);
        }
        entries.reverse();

        ensure_writable(path, force)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => {
                let rows: Vec<EntryRow> = entries.iter().map(|e| EntryRow::from(*e)).collect();
                export_csv(&rows, path)?
            }
            ExportFormat::Json => export_json(&entries, path)?,
            ExportFormat::Xlsx => {
                let rows: Vec<EntryRow> = entries.iter().map(|e| EntryRow::from(*e)).collect();
                export_xlsx(&rows, path)?
            }
        }

        Ok(entries.len())
    }

    /// Write a fixed text file (templates and samples).
    pub fn write_text(path: &Path, content: &str, label: &str, force: bool) -> AppResult<()> {
        ensure_writable(path, force)?;
        fs::write(path, content)?;
        notify_export_success(label, path);
        Ok(())
    }
}
