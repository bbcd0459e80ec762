use crate::cli::commands::Selection;
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::errors::AppResult;
use crate::ui::views::{render_daily_summary, render_entries};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        employee,
        all,
        period,
        range,
        category,
        project,
        daily,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        session.require(Feature::ViewOwnEntries)?;

        let selection = Selection {
            employee: employee.as_deref(),
            all: *all,
            period: period.as_deref(),
            range: range.as_deref(),
            category: category.as_deref(),
            project: project.as_deref(),
        };
        let (filter, team) = selection.to_filter(&session, Feature::ViewAllEntries)?;

        let out = if *daily {
            render_daily_summary(&session.state.book.daily_summary(&filter), cfg.separator())
        } else {
            render_entries(&session.state.book.filter(&filter), team, cfg.separator())
        };
        print!("{}", out);
    }

    Ok(())
}
