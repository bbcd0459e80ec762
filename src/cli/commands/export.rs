use crate::cli::commands::Selection;
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        format,
        employee,
        all,
        period,
        range,
        category,
        project,
        force,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        session.require(Feature::ExportOwnData)?;

        let selection = Selection {
            employee: employee.as_deref(),
            all: *all,
            period: period.as_deref(),
            range: range.as_deref(),
            category: category.as_deref(),
            project: project.as_deref(),
        };
        let (filter, _) = selection.to_filter(&session, Feature::ExportTeamData)?;

        let written = ExportLogic::export(&session.state.book, &filter, *format, file, *force)?;
        if written > 0 {
            info(format!("{} entries written.", written));
        }
    }

    Ok(())
}
