use crate::cli::commands::{parse_category, parse_date_arg};
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::errors::{AppError, AppResult};
use crate::models::entry::NewEntry;
use crate::models::source::EntrySource;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::{format_optional_hhmm, hours_between, parse_hours, parse_optional_time};
use chrono::Utc;

/// Add a manual time entry.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_arg,
        category,
        project,
        start,
        end,
        hours,
        description,
        employee,
    } = &cli.command
    {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::EditOwnEntries)?;

        let employee = session.scoped_employee(employee.as_deref())?;

        let d = match date_arg {
            Some(s) => parse_date_arg(s)?,
            None => date::today(),
        };

        let category = parse_category(category.as_deref().unwrap_or(&cfg.default_category))?;
        let start_time = parse_optional_time(start.as_ref())?;
        let end_time = parse_optional_time(end.as_ref())?;

        let duration_hours = match (hours, start_time, end_time) {
            (Some(h), _, _) => parse_hours(h)?,
            (None, Some(s), Some(e)) => hours_between(s, e),
            _ => {
                return Err(AppError::InvalidNumber(
                    "give --hours, or both --in and --out".into(),
                ));
            }
        };

        let now = Utc::now();
        let entry = session
            .state
            .book
            .add(
                NewEntry {
                    employee_name: employee,
                    date: d,
                    category,
                    project: project.clone().unwrap_or_else(|| cfg.default_project.clone()),
                    start_time,
                    end_time,
                    duration_hours,
                    description: description.clone().unwrap_or_default(),
                    source: EntrySource::Manual,
                },
                now,
            )
            .clone();

        session.state.save_entries(&session.pool.store(), now)?;

        session.audit(
            "add",
            &format!("#{}", entry.id),
            &format!(
                "{} {} {} {}-{} {}h",
                entry.employee_name,
                entry.date,
                entry.category.as_str(),
                format_optional_hhmm(entry.start_time),
                format_optional_hhmm(entry.end_time),
                entry.duration_hours
            ),
        );

        success(format!(
            "Entry #{} added: {} {} {:.2}h ({})",
            entry.id,
            entry.employee_name,
            entry.date,
            entry.duration_hours,
            entry.category.label()
        ));
    }

    Ok(())
}
