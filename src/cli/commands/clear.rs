use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::entries::check_delete_allowed;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, warning};
use chrono::Utc;

/// Delete every entry of one employee.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { employee, force } = &cli.command {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::EditOwnEntries)?;
        check_delete_allowed(&session.state.app_config, session.is_admin())?;

        let employee = session.scoped_employee(employee.as_deref())?;
        let count = session
            .state
            .book
            .entries()
            .iter()
            .filter(|e| e.employee_name.eq_ignore_ascii_case(&employee))
            .count();

        if count == 0 {
            info(format!("No entries for {}.", employee));
            return Ok(());
        }

        if !*force {
            warning(format!(
                "Delete all {} entries of {}? This action is irreversible.",
                count, employee
            ));
            if !confirm("Confirm [y/N]: ")? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = session
            .state
            .book
            .retain(|e| !e.employee_name.eq_ignore_ascii_case(&employee));
        session.state.save_entries(&session.pool.store(), Utc::now())?;

        session.audit(
            "clear",
            &employee,
            &format!("{} entries removed", removed),
        );
        success(format!("{} entries of {} have been deleted.", removed, employee));
    }

    Ok(())
}
