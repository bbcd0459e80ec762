use crate::cli::commands::parse_date_arg;
use crate::cli::parser::{Cli, Commands, PeriodsAction};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::logic::ExportLogic;
use crate::export::periods_io::{PAY_PERIOD_TEMPLATE, load_periods_file, periods_json, write_periods_csv};
use crate::export::{TableFormat, notify_export_success};
use crate::models::pay_period::PayPeriodTable;
use crate::ui::messages::{success, warning};
use crate::ui::views::{render_pay_period, render_pay_periods};
use crate::utils::date;
use chrono::Utc;
use std::fs;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Periods { action } = &cli.command {
        let mut session = Session::open(cli, cfg)?;

        match action {
            PeriodsAction::List => {
                print!(
                    "{}",
                    render_pay_periods(
                        &session.state.pay_periods,
                        &session.state.pay_periods_name,
                        date::today(),
                        cfg.separator()
                    )
                );
            }
            PeriodsAction::Show { id, date: on } => show(&session, id.as_deref(), on.as_deref())?,
            PeriodsAction::Import { file } => {
                session.require(Feature::ManagePayPeriods)?;
                import(&mut session, file)?;
            }
            PeriodsAction::Export {
                file,
                format,
                force,
            } => {
                session.require(Feature::ManagePayPeriods)?;
                export(&session, file, *format, *force)?;
            }
            PeriodsAction::Template { file, force } => {
                session.require(Feature::ManagePayPeriods)?;
                ExportLogic::write_text(
                    Path::new(file),
                    PAY_PERIOD_TEMPLATE,
                    "Pay period template",
                    *force,
                )?;
            }
            PeriodsAction::Generate {
                start,
                count,
                days,
                name,
            } => {
                session.require(Feature::ManagePayPeriods)?;
                generate(&mut session, start, *count, *days, name.as_deref())?;
            }
            PeriodsAction::Reset => {
                session.require(Feature::ManagePayPeriods)?;
                session.state.reset_pay_periods(&session.pool.store())?;
                session.audit("periods_reset", &session.state.pay_periods_name, "Built-in table restored");
                success(format!(
                    "Pay periods reset to '{}'.",
                    session.state.pay_periods_name
                ));
            }
        }
    }

    Ok(())
}

/// One period: by id, by date, or the current (or next) one.
fn show(session: &Session, id: Option<&str>, on: Option<&str>) -> AppResult<()> {
    let table = &session.state.pay_periods;
    let today = date::today();

    let period = match (id, on) {
        (Some(id), _) => table
            .by_id(id)
            .ok_or_else(|| AppError::PayPeriodNotFound(id.to_string()))?,
        (None, Some(d)) => {
            let d = parse_date_arg(d)?;
            table
                .find_containing(d)
                .ok_or_else(|| AppError::PayPeriodNotFound(format!("no period contains {}", d)))?
        }
        (None, None) => table
            .current_or_next(today)
            .ok_or_else(|| AppError::PayPeriodNotFound("no current or upcoming period".into()))?,
    };

    let holidays = session.state.holidays.in_period(period);
    print!("{}", render_pay_period(period, today, &holidays));
    Ok(())
}

fn import(session: &mut Session, file: &str) -> AppResult<()> {
    let (table, name, skipped) = load_periods_file(Path::new(file))?;

    for row in &skipped {
        warning(format!("Line {} skipped: {}", row.line, row.reason));
    }

    let count = table.len();
    session.state.pay_periods = table;
    session.state.pay_periods_name = name;
    session.state.save_pay_periods(&session.store())?;

    session.audit(
        "periods_import",
        file,
        &format!("{} periods loaded as '{}'", count, session.state.pay_periods_name),
    );
    success(format!(
        "Imported {} pay periods as '{}'.",
        count, session.state.pay_periods_name
    ));
    Ok(())
}

fn export(session: &Session, file: &str, format: TableFormat, force: bool) -> AppResult<()> {
    let path = Path::new(file);
    let table = &session.state.pay_periods;

    match format {
        TableFormat::Json => {
            ExportLogic::write_text(path, &periods_json(table, Utc::now())?, "Pay periods JSON", force)
        }
        TableFormat::Csv => {
            ensure_writable(path, force)?;
            write_periods_csv(fs::File::create(path)?, table)?;
            notify_export_success("Pay periods CSV", path);
            Ok(())
        }
    }
}

fn generate(
    session: &mut Session,
    start: &str,
    count: u32,
    days: u32,
    name: Option<&str>,
) -> AppResult<()> {
    let first = parse_date_arg(start)?;
    let table = PayPeriodTable::generate(first, count, days)?;

    session.state.pay_periods = table;
    session.state.pay_periods_name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} Pay Periods ({} days)", first.format("%Y"), days));
    session.state.save_pay_periods(&session.store())?;

    session.audit(
        "periods_generate",
        &session.state.pay_periods_name,
        &format!("{} periods of {} days from {}", count, days, first),
    );
    success(format!(
        "Generated {} pay periods as '{}'.",
        count, session.state.pay_periods_name
    ));
    Ok(())
}
