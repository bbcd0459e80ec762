use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::errors::{AppError, AppResult};
use crate::export::ImportLogic;
use crate::ui::messages::{info, success, warning};
use chrono::Utc;
use std::path::Path;

/// Import time entries from CSV (or a JSON export / legacy dump).
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, employee } = &cli.command {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::EditOwnEntries)?;

        let path = Path::new(file);
        if !path.exists() {
            return Err(AppError::Import(format!("file not found: {}", file)));
        }

        // Employees import only their own rows.
        let (fallback, owner) = if session.is_admin() {
            (employee.clone(), None)
        } else {
            let own = session.scoped_employee(employee.as_deref())?;
            (Some(own.clone()), Some(own))
        };

        let now = Utc::now();
        let outcome = ImportLogic::import_file(
            &mut session.state.book,
            path,
            fallback.as_deref(),
            owner.as_deref(),
            now,
        )?;

        for row in &outcome.skipped {
            warning(format!("Line {} skipped: {}", row.line, row.reason));
        }

        if outcome.added == 0 {
            info(format!(
                "No new entries imported ({} duplicates, {} skipped).",
                outcome.duplicates,
                outcome.skipped.len()
            ));
            return Ok(());
        }

        session.state.save_entries(&session.pool.store(), now)?;

        let summary = format!(
            "{} imported, {} duplicates, {} skipped",
            outcome.added,
            outcome.duplicates,
            outcome.skipped.len()
        );
        session.audit("import", file, &summary);
        success(format!("Import completed: {}", summary));
    }

    Ok(())
}
