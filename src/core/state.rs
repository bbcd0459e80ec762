//! In-memory application state, loaded from and saved to the blob store.

use crate::core::entries::EntryBook;
use crate::db::store::{BlobStore, StorageKey, read_blob, write_blob};
use crate::errors::AppResult;
use crate::models::app_config::AppConfig;
use crate::models::credential::AdminCredential;
use crate::models::employee::EmployeeSettings;
use crate::models::holiday::HolidayCalendar;
use crate::models::pay_period::PayPeriodTable;
use crate::models::timer::TimerState;
use chrono::{DateTime, Utc};

pub const DEFAULT_PAY_PERIODS_NAME: &str = "Default 2025 Pay Periods";
pub const DEFAULT_HOLIDAYS_NAME: &str = "Default 2025 Holidays";

#[derive(Debug, Clone)]
pub struct AppState {
    pub book: EntryBook,
    pub employee: Option<EmployeeSettings>,
    pub pay_periods: PayPeriodTable,
    pub pay_periods_name: String,
    pub holidays: HolidayCalendar,
    pub holidays_name: String,
    pub app_config: AppConfig,
    pub timer: Option<TimerState>,
    pub credential: Option<AdminCredential>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            book: EntryBook::default(),
            employee: None,
            pay_periods: PayPeriodTable::builtin(),
            pay_periods_name: DEFAULT_PAY_PERIODS_NAME.to_string(),
            holidays: HolidayCalendar::builtin(),
            holidays_name: DEFAULT_HOLIDAYS_NAME.to_string(),
            app_config: AppConfig::default(),
            timer: None,
            credential: None,
        }
    }
}

impl AppState {
    /// Read every key. Missing or unreadable blobs take their defaults; only
    /// storage failures are errors.
    pub fn load(store: &dyn BlobStore) -> AppResult<Self> {
        let mut state = Self::default();

        if let Some(book) = read_blob::<EntryBook>(store, StorageKey::TimeEntries)? {
            state.book = book.repaired();
        }

        state.employee = read_blob(store, StorageKey::EmployeeSettings)?;

        // A stored table is only adopted together with its name.
        if let Some(table) = read_blob::<PayPeriodTable>(store, StorageKey::PayPeriods)? {
            state.pay_periods = table;
            if let Some(name) = store.get(StorageKey::PayPeriodsName)? {
                state.pay_periods_name = name;
            }
        }

        if let Some(calendar) = read_blob::<HolidayCalendar>(store, StorageKey::Holidays)? {
            state.holidays = HolidayCalendar::new(calendar.holidays);
            if let Some(name) = store.get(StorageKey::HolidaysName)? {
                state.holidays_name = name;
            }
        }

        if let Some(cfg) = read_blob(store, StorageKey::AppConfig)? {
            state.app_config = cfg;
        }

        state.timer = read_blob(store, StorageKey::Timer)?;
        state.credential = read_blob(store, StorageKey::AdminCredential)?;

        Ok(state)
    }

    /// Remembered employee name, if any.
    pub fn employee_name(&self) -> Option<&str> {
        self.employee
            .as_ref()
            .map(|e| e.employee_name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn save_entries(&mut self, store: &dyn BlobStore, now: DateTime<Utc>) -> AppResult<()> {
        self.book.touch(now);
        write_blob(store, StorageKey::TimeEntries, &self.book)
    }

    pub fn save_employee(&self, store: &dyn BlobStore) -> AppResult<()> {
        match &self.employee {
            Some(e) => write_blob(store, StorageKey::EmployeeSettings, e),
            None => store.remove(StorageKey::EmployeeSettings),
        }
    }

    pub fn save_pay_periods(&self, store: &dyn BlobStore) -> AppResult<()> {
        write_blob(store, StorageKey::PayPeriods, &self.pay_periods)?;
        store.set(StorageKey::PayPeriodsName, &self.pay_periods_name)
    }

    /// Drop the stored table so the built-in one is used again.
    pub fn reset_pay_periods(&mut self, store: &dyn BlobStore) -> AppResult<()> {
        store.remove(StorageKey::PayPeriods)?;
        store.remove(StorageKey::PayPeriodsName)?;
        self.pay_periods = PayPeriodTable::builtin();
        self.pay_periods_name = DEFAULT_PAY_PERIODS_NAME.to_string();
        Ok(())
    }

    pub fn save_holidays(&self, store: &dyn BlobStore) -> AppResult<()> {
        write_blob(store, StorageKey::Holidays, &self.holidays)?;
        store.set(StorageKey::HolidaysName, &self.holidays_name)
    }

    pub fn reset_holidays(&mut self, store: &dyn BlobStore) -> AppResult<()> {
        store.remove(StorageKey::Holidays)?;
        store.remove(StorageKey::HolidaysName)?;
        self.holidays = HolidayCalendar::builtin();
        self.holidays_name = DEFAULT_HOLIDAYS_NAME.to_string();
        Ok(())
    }

    pub fn save_app_config(&self, store: &dyn BlobStore) -> AppResult<()> {
        write_blob(store, StorageKey::AppConfig, &self.app_config)
    }

    /// A stopped timer removes its key.
    pub fn save_timer(&self, store: &dyn BlobStore) -> AppResult<()> {
        match &self.timer {
            Some(t) => write_blob(store, StorageKey::Timer, t),
            None => store.remove(StorageKey::Timer),
        }
    }

    pub fn save_credential(&self, store: &dyn BlobStore) -> AppResult<()> {
        match &self.credential {
            Some(c) => write_blob(store, StorageKey::AdminCredential, c),
            None => store.remove(StorageKey::AdminCredential),
        }
    }
}
