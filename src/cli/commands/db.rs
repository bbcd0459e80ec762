use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        session.require(Feature::DataCleanup)?;
        let conn = &session.pool.conn;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(conn)?;
            success("Migration completed.");
        }

        if *show_info {
            stats::print_db_info(&session.pool, &cfg.database)?;
        }

        if *check {
            info("Running integrity check…");
            let integrity: String =
                conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
