//! Key/value blob storage.
//!
//! Every piece of persisted state is one JSON document stored under one key
//! and replaced in full on every save.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    TimeEntries,
    EmployeeSettings,
    PayPeriods,
    PayPeriodsName,
    Holidays,
    HolidaysName,
    AppConfig,
    Timer,
    AdminCredential,
}

impl StorageKey {
    pub const ALL: [StorageKey; 9] = [
        StorageKey::TimeEntries,
        StorageKey::EmployeeSettings,
        StorageKey::PayPeriods,
        StorageKey::PayPeriodsName,
        StorageKey::Holidays,
        StorageKey::HolidaysName,
        StorageKey::AppConfig,
        StorageKey::Timer,
        StorageKey::AdminCredential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::TimeEntries => "unifiedTimeEntries",
            StorageKey::EmployeeSettings => "employeeSettings",
            StorageKey::PayPeriods => "payPeriodsConfig",
            StorageKey::PayPeriodsName => "payPeriodsConfigName",
            StorageKey::Holidays => "holidaysConfig",
            StorageKey::HolidaysName => "holidaysConfigName",
            StorageKey::AppConfig => "adminAppConfig",
            StorageKey::Timer => "timerState",
            StorageKey::AdminCredential => "adminCredential",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-value key/value storage.
pub trait BlobStore {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>>;
    fn set(&self, key: StorageKey, value: &str) -> AppResult<()>;
    fn remove(&self, key: StorageKey) -> AppResult<()>;
    /// Stored keys with their value length in bytes.
    fn entries(&self) -> AppResult<Vec<(String, usize)>>;
}

/// Read and decode a blob.
///
/// A missing key yields `None`. A blob that no longer decodes is reported and
/// treated as missing, so callers fall back to their defaults.
pub fn read_blob<T: DeserializeOwned>(store: &dyn BlobStore, key: StorageKey) -> AppResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warning(format!("Ignoring unreadable '{}' data: {}", key, e));
            Ok(None)
        }
    }
}

pub fn write_blob<T: Serialize + ?Sized>(
    store: &dyn BlobStore,
    key: StorageKey,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Backed by the `kv_store` table.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteStore<'_> {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM kv_store WHERE key = ?1")?;
        let value = stmt
            .query_row([key.as_str()], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key.as_str(), value, Local::now().to_rfc3339()])?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<(String, usize)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, length(CAST(value AS BLOB)) FROM kv_store ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

/// In-process store, used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    map: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.map.borrow().get(key.as_str()).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.map
            .borrow_mut()
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.map.borrow_mut().remove(key.as_str());
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<(String, usize)>> {
        Ok(self
            .map
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.len()))
            .collect())
    }
}
