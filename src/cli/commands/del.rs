use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::entries::check_delete_allowed;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, warning};
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = &cli.command {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::EditOwnEntries)?;
        check_delete_allowed(&session.state.app_config, session.is_admin())?;
        session.check_owner(*id)?;

        if !*force {
            warning(format!("Delete entry #{}? This action is irreversible.", id));
            if !confirm("Confirm [y/N]: ")? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = session.state.book.delete(*id)?;
        session.state.save_entries(&session.pool.store(), Utc::now())?;

        session.audit(
            "del",
            &format!("#{}", removed.id),
            &format!(
                "{} {} {} {}h",
                removed.employee_name, removed.date, removed.project, removed.duration_hours
            ),
        );

        success(format!("Entry #{} has been deleted.", removed.id));
    }

    Ok(())
}
