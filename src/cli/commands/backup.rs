use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        session.require(Feature::DataCleanup)?;
        BackupLogic::backup(&session.pool, cfg, file, *compress, *force)?;
    }

    Ok(())
}
