use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::entry::{DEFAULT_PROJECT, NewEntry};
use crate::models::source::EntrySource;
use crate::models::timer::TimerState;
use crate::utils::time::{round_half_hour, truncate_to_minute};
use chrono::{DateTime, Duration, Local, Utc};

pub const TIMER_DESCRIPTION: &str = "Timer entry";

pub struct TimerLogic;

impl TimerLogic {
    /// Begin a session. Only one timer may run at a time.
    pub fn start(
        current: Option<&TimerState>,
        employee: &str,
        category: Category,
        project: &str,
        now: DateTime<Utc>,
    ) -> AppResult<TimerState> {
        if let Some(running) = current {
            return Err(AppError::TimerAlreadyRunning(running.employee_name.clone()));
        }

        let employee = employee.trim();
        if employee.is_empty() {
            return Err(AppError::MissingEmployee);
        }

        let project = project.trim();
        Ok(TimerState {
            employee_name: employee.to_string(),
            category,
            project: if project.is_empty() {
                DEFAULT_PROJECT.to_string()
            } else {
                project.to_string()
            },
            started_at: now,
        })
    }

    pub fn elapsed(state: &TimerState, now: DateTime<Utc>) -> Duration {
        now - state.started_at
    }

    /// Hours recorded for a session: nearest half hour, never negative.
    pub fn rounded_hours(elapsed: Duration) -> f64 {
        let hours = elapsed.num_seconds() as f64 / 3600.0;
        round_half_hour(hours).max(0.0)
    }

    /// Turn a finished session into an entry stamped with local date and times.
    pub fn stop(state: &TimerState, now: DateTime<Utc>, description: Option<&str>) -> NewEntry {
        let start_local = state.started_at.with_timezone(&Local);
        let end_local = now.with_timezone(&Local);

        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => TIMER_DESCRIPTION.to_string(),
        };

        NewEntry {
            employee_name: state.employee_name.clone(),
            date: end_local.date_naive(),
            category: state.category,
            project: state.project.clone(),
            start_time: Some(truncate_to_minute(start_local.time())),
            end_time: Some(truncate_to_minute(end_local.time())),
            duration_hours: Self::rounded_hours(Self::elapsed(state, now)),
            description,
            source: EntrySource::Timer,
        }
    }
}
