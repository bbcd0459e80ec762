use crate::cli::commands::{parse_category, parse_date_arg};
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::entries::check_edit_allowed;
use crate::errors::{AppError, AppResult};
use crate::models::entry::EntryPatch;
use crate::ui::messages::success;
use crate::utils::time::{parse_hours, parse_optional_time};
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        category,
        project,
        start,
        end,
        hours,
        description,
    } = &cli.command
    {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::EditOwnEntries)?;
        check_edit_allowed(&session.state.app_config, session.is_admin())?;
        session.check_owner(*id)?;

        let patch = EntryPatch {
            date: date.as_deref().map(parse_date_arg).transpose()?,
            category: category.as_deref().map(parse_category).transpose()?,
            project: project.clone(),
            start_time: parse_optional_time(start.as_ref())?,
            end_time: parse_optional_time(end.as_ref())?,
            duration_hours: hours.as_deref().map(parse_hours).transpose()?,
            description: description.clone(),
        };

        if patch.is_empty() {
            return Err(AppError::Other("nothing to change".into()));
        }

        let now = Utc::now();
        let entry = session.state.book.update(*id, patch, now)?.clone();
        session.state.save_entries(&session.pool.store(), now)?;

        session.audit(
            "edit",
            &format!("#{}", entry.id),
            &format!(
                "{} {} {} {}h",
                entry.employee_name,
                entry.date,
                entry.project,
                entry.duration_hours
            ),
        );

        success(format!("Entry #{} updated.", entry.id));
    }

    Ok(())
}
