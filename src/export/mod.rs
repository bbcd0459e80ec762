// src/export/mod.rs

pub mod entries_import;
mod excel_date;
pub(crate) mod fs_utils;
pub mod holidays_io;
mod json_csv;
pub mod logic;
mod model;
pub mod periods_io;
pub mod range;
mod xlsx;

pub use entries_import::{ImportLogic, ImportOutcome, SkippedRow};
pub use json_csv::write_entries_csv;
pub use logic::ExportLogic;
pub use model::{ENTRY_HEADERS, EntryRow};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for file writers.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Format for pay period and holiday tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Csv,
    Json,
}
