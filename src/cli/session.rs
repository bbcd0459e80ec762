//! Per-invocation context shared by the command handlers: open database,
//! loaded state and the resolved access level.

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::access::{self, AccessLevel, AccessLogic, AccessRequest, Feature};
use crate::core::state::AppState;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::pay_period::PayPeriod;
use crate::ui::messages::warning;
use crate::utils::date;

pub struct Session {
    pub pool: DbPool,
    pub state: AppState,
    pub level: AccessLevel,
    pub request: AccessRequest,
}

impl Session {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let state = AppState::load(&pool.store())?;

        let request = AccessRequest::from_url(cli.url.as_deref());
        let level = AccessLogic::resolve(
            request,
            state.credential.as_ref(),
            cli.passphrase.as_deref(),
        )?;

        if request.admin && state.credential.is_none() {
            warning("Admin mode requested but no passphrase is enrolled; run `admin enroll` first.");
        }

        Ok(Self {
            pool,
            state,
            level,
            request,
        })
    }

    pub fn store(&self) -> SqliteStore<'_> {
        self.pool.store()
    }

    pub fn is_admin(&self) -> bool {
        self.level == AccessLevel::CompanyAdmin
    }

    pub fn require(&self, feature: Feature) -> AppResult<()> {
        access::require(self.level, feature)
    }

    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        audit(&self.pool.conn, operation, target, message);
    }

    /// `explicit`, else the remembered name.
    pub fn employee(&self, explicit: Option<&str>) -> AppResult<String> {
        explicit
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .or_else(|| self.state.employee_name())
            .map(str::to_string)
            .ok_or(AppError::MissingEmployee)
    }

    /// Employee whose data a read or export may touch.
    ///
    /// Employees see their own data; naming somebody else needs admin access.
    pub fn scoped_employee(&self, explicit: Option<&str>) -> AppResult<String> {
        let name = self.employee(explicit)?;
        if let Some(own) = self.state.employee_name()
            && !own.eq_ignore_ascii_case(&name)
        {
            self.require(Feature::ViewAllEntries)?;
        }
        Ok(name)
    }

    /// Employees may only change their own entries.
    pub fn check_owner(&self, id: u64) -> AppResult<()> {
        let entry = self.state.book.get(id).ok_or(AppError::EntryNotFound(id))?;
        if self.is_admin() {
            return Ok(());
        }

        let own = self.employee(None)?;
        if entry.employee_name.eq_ignore_ascii_case(&own) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "entry #{} belongs to {}",
                id, entry.employee_name
            )))
        }
    }

    /// `--period ID|current`.
    pub fn period(&self, selector: Option<&str>) -> AppResult<Option<PayPeriod>> {
        let Some(sel) = selector.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let table = &self.state.pay_periods;
        let found = if sel.eq_ignore_ascii_case("current") {
            table.current_or_next(date::today())
        } else {
            table.by_id(sel)
        };

        found
            .cloned()
            .map(Some)
            .ok_or_else(|| AppError::PayPeriodNotFound(sel.to_string()))
    }
}
