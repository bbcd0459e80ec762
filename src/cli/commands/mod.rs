pub mod add;
pub mod admin;
pub mod backup;
pub mod clear;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod employee;
pub mod export;
pub mod holidays;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod periods;
pub mod stats;
pub mod timer;

use crate::cli::session::Session;
use crate::core::access::Feature;
use crate::core::entries::EntryFilter;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::category::Category;
use crate::utils::date;
use chrono::NaiveDate;

pub(crate) fn parse_category(s: &str) -> AppResult<Category> {
    Category::from_code(s).ok_or_else(|| AppError::InvalidCategory(s.to_string()))
}

pub(crate) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Entry selection flags shared by `list` and `export`.
pub(crate) struct Selection<'a> {
    pub employee: Option<&'a str>,
    pub all: bool,
    pub period: Option<&'a str>,
    pub range: Option<&'a str>,
    pub category: Option<&'a str>,
    pub project: Option<&'a str>,
}

impl Selection<'_> {
    /// Build the filter. Whole-team selections need `team_feature`; an admin
    /// without an employee name sees the whole team.
    ///
    /// Returns the filter and whether it spans more than one employee.
    pub(crate) fn to_filter(
        &self,
        session: &Session,
        team_feature: Feature,
    ) -> AppResult<(EntryFilter, bool)> {
        let team = self.all
            || (session.is_admin()
                && self.employee.is_none()
                && session.state.employee_name().is_none());

        let mut filter = if team {
            session.require(team_feature)?;
            EntryFilter::default()
        } else {
            EntryFilter::for_employee(&session.scoped_employee(self.employee)?)
        };

        if let Some(r) = self.range {
            let (from, to) = parse_range(r)?;
            filter.from = Some(from);
            filter.to = Some(to);
        }
        if let Some(p) = session.period(self.period)? {
            filter = filter.within_period(&p);
        }
        filter.category = self.category.map(parse_category).transpose()?;
        filter.project = self.project.map(str::to_string);

        Ok((filter, team))
    }
}
