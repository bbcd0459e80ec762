use crate::core::entries::{EntryBook, EntryFilter};
use crate::core::timer::TimerLogic;
use crate::core::validation::ValidationLogic;
use crate::models::category::Category;
use crate::models::pay_period::PayPeriod;
use crate::models::timer::TimerState;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeStats {
    pub employee: String,
    pub period: Option<PayPeriod>,
    pub entries: usize,
    pub total_hours: f64,
    /// Distinct dates with at least one entry.
    pub work_days: usize,
    pub period_days: i64,
    pub days_elapsed: i64,
    pub days_remaining: Option<i64>,
    pub today_hours: f64,
    /// Hours of the running session when its timer belongs to this employee.
    pub running_hours: Option<f64>,
    pub daily_target: f64,
    pub progress_pct: f64,
    pub by_category: BTreeMap<Category, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_entries: usize,
    pub valid_hours: f64,
    pub employees: usize,
    pub projects: usize,
    pub categories: BTreeSet<Category>,
    pub quality_pct: u32,
    pub invalid: usize,
    pub duplicates: usize,
}

pub struct StatsLogic;

impl StatsLogic {
    pub fn employee(
        book: &EntryBook,
        employee: &str,
        period: Option<&PayPeriod>,
        today: NaiveDate,
        timer: Option<&TimerState>,
        now: DateTime<Utc>,
        daily_target: f64,
    ) -> EmployeeStats {
        let mut filter = EntryFilter::for_employee(employee);
        if let Some(p) = period {
            filter = filter.within_period(p);
        }

        let entries = book.filter(&filter);
        let total_hours: f64 = entries.iter().map(|e| e.duration_hours).sum();
        let work_days = entries.iter().map(|e| e.date).collect::<BTreeSet<_>>().len();

        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
        for e in &entries {
            *by_category.entry(e.category).or_insert(0.0) += e.duration_hours;
        }

        let today_hours: f64 = entries
            .iter()
            .filter(|e| e.date == today)
            .map(|e| e.duration_hours)
            .sum();

        let running_hours = timer
            .filter(|t| t.employee_name.eq_ignore_ascii_case(employee.trim()))
            .map(|t| (TimerLogic::elapsed(t, now).num_seconds().max(0) as f64) / 3600.0);

        let progress_pct = if daily_target > 0.0 {
            (today_hours / daily_target * 100.0).min(100.0)
        } else {
            0.0
        };

        EmployeeStats {
            employee: employee.trim().to_string(),
            period: period.cloned(),
            entries: entries.len(),
            total_hours,
            work_days,
            period_days: period.map(|p| p.period_days()).unwrap_or(0),
            days_elapsed: period.map(|p| p.days_elapsed(today)).unwrap_or(0),
            days_remaining: period.map(|p| p.days_remaining(today)),
            today_hours,
            running_hours,
            daily_target,
            progress_pct,
            by_category,
        }
    }

    pub fn admin(book: &EntryBook) -> AdminStats {
        let report = ValidationLogic::validate(book.entries());
        let dups = ValidationLogic::duplicate_ids(book.entries());

        let valid_hours = book
            .entries()
            .iter()
            .filter(|e| e.is_valid() && !dups.contains(&e.id))
            .map(|e| e.duration_hours)
            .sum();

        AdminStats {
            total_entries: book.len(),
            valid_hours,
            employees: book.employees().len(),
            projects: book.projects().len(),
            categories: book.categories(),
            quality_pct: report.quality_pct(),
            invalid: report.invalid,
            duplicates: report.duplicates,
        }
    }
}
