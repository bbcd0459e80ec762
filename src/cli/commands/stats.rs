use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::stats::StatsLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::views::render_employee_stats;
use crate::utils::date;
use chrono::Utc;

/// Hours for one employee, optionally within a pay period.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { employee, period } = &cli.command {
        let session = Session::open(cli, cfg)?;
        session.require(Feature::ViewOwnEntries)?;

        let employee = session.scoped_employee(employee.as_deref())?;
        let period = session.period(period.as_deref())?;

        let stats = StatsLogic::employee(
            &session.state.book,
            &employee,
            period.as_ref(),
            date::today(),
            session.state.timer.as_ref(),
            Utc::now(),
            cfg.daily_target_hours,
        );

        header("Statistics");
        print!("{}", render_employee_stats(&stats));
    }

    Ok(())
}
