use crate::cli::parser::{Cli, Commands, HolidaysAction};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::holidays::HolidayLogic;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::holidays_io::{
    HOLIDAY_TEMPLATE, holidays_json, load_holidays_file, write_holidays_csv,
};
use crate::export::logic::ExportLogic;
use crate::export::{TableFormat, notify_export_success};
use crate::models::holiday::Holiday;
use crate::ui::messages::{info, success, warning};
use crate::ui::views::render_holidays;
use chrono::Utc;
use std::fs;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Holidays { action } = &cli.command {
        let mut session = Session::open(cli, cfg)?;

        match action {
            HolidaysAction::List { period, employee } => {
                list(&session, cfg, period.as_deref(), employee.as_deref())?
            }
            HolidaysAction::Select {
                period,
                ids,
                employee,
            } => {
                session.require(Feature::EditOwnEntries)?;
                select(&mut session, period, ids, employee.as_deref())?;
            }
            HolidaysAction::Import { file } => {
                session.require(Feature::ManageHolidays)?;
                import(&mut session, file)?;
            }
            HolidaysAction::Export {
                file,
                format,
                force,
            } => {
                session.require(Feature::ManageHolidays)?;
                export(&session, file, *format, *force)?;
            }
            HolidaysAction::Template { file, force } => {
                session.require(Feature::ManageHolidays)?;
                ExportLogic::write_text(Path::new(file), HOLIDAY_TEMPLATE, "Holiday template", *force)?;
            }
            HolidaysAction::Reset => {
                session.require(Feature::ManageHolidays)?;
                session.state.reset_holidays(&session.pool.store())?;
                session.audit("holidays_reset", &session.state.holidays_name, "Built-in calendar restored");
                success(format!("Holidays reset to '{}'.", session.state.holidays_name));
            }
        }
    }

    Ok(())
}

fn list(session: &Session, cfg: &Config, period: Option<&str>, employee: Option<&str>) -> AppResult<()> {
    let calendar = &session.state.holidays;
    println!("Configuration: {}\n", session.state.holidays_name);

    let Some(period) = session.period(period)? else {
        let all: Vec<&Holiday> = calendar.holidays.iter().collect();
        print!("{}", render_holidays(&all, &[], cfg.separator()));
        return Ok(());
    };

    let employee = match employee {
        Some(e) => Some(session.scoped_employee(Some(e))?),
        None => session.state.employee_name().map(str::to_string),
    };
    let selected = employee
        .map(|e| HolidayLogic::selected_ids(&session.state.book, calendar, &e, &period))
        .unwrap_or_default();

    println!("Pay period: {} ({})\n", period.id, period.description);
    print!(
        "{}",
        render_holidays(&calendar.in_period(&period), &selected, cfg.separator())
    );
    Ok(())
}

fn select(session: &mut Session, period: &str, ids: &[String], employee: Option<&str>) -> AppResult<()> {
    let employee = session.scoped_employee(employee)?;
    let period = session
        .period(Some(period))?
        .ok_or_else(|| AppError::PayPeriodNotFound(period.to_string()))?;

    let in_period = session.state.holidays.in_period(&period);
    for id in ids {
        if !in_period.iter().any(|h| &h.id == id) {
            warning(format!("Holiday '{}' is not in pay period {}; ignored.", id, period.id));
        }
    }

    let now = Utc::now();
    let (added, removed) = HolidayLogic::apply_selection(
        &mut session.state.book,
        &session.state.holidays,
        &employee,
        &period,
        ids,
        now,
    );

    if added == 0 && removed == 0 {
        info("Holiday selection unchanged.");
        return Ok(());
    }

    session.state.save_entries(&session.pool.store(), now)?;

    let summary = format!("{} added, {} removed", added, removed);
    session.audit("holidays_select", &format!("{} {}", employee, period.id), &summary);
    success(format!("Holidays for {} in {}: {}", employee, period.id, summary));
    Ok(())
}

fn import(session: &mut Session, file: &str) -> AppResult<()> {
    let (calendar, name, skipped) = load_holidays_file(Path::new(file))?;

    for row in &skipped {
        warning(format!("Line {} skipped: {}", row.line, row.reason));
    }

    let count = calendar.holidays.len();
    session.state.holidays = calendar;
    session.state.holidays_name = name;
    session.state.save_holidays(&session.store())?;

    session.audit(
        "holidays_import",
        file,
        &format!("{} holidays loaded as '{}'", count, session.state.holidays_name),
    );
    success(format!(
        "Imported {} holidays as '{}'.",
        count, session.state.holidays_name
    ));
    Ok(())
}

fn export(session: &Session, file: &str, format: TableFormat, force: bool) -> AppResult<()> {
    let path = Path::new(file);
    let calendar = &session.state.holidays;

    match format {
        TableFormat::Json => {
            ExportLogic::write_text(path, &holidays_json(calendar)?, "Holidays JSON", force)
        }
        TableFormat::Csv => {
            ensure_writable(path, force)?;
            write_holidays_csv(fs::File::create(path)?, calendar)?;
            notify_export_success("Holidays CSV", path);
            Ok(())
        }
    }
}
