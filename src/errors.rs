//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that every command
//! reports failures the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Time entry #{0} not found")]
    EntryNotFound(u64),

    #[error("Pay period not found: {0}")]
    PayPeriodNotFound(String),

    #[error("Invalid pay period table: {0}")]
    InvalidPayPeriods(String),

    #[error("A timer is already running for {0}")]
    TimerAlreadyRunning(String),

    #[error("No timer is running")]
    TimerNotRunning,

    #[error("Employee name is required")]
    MissingEmployee,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
