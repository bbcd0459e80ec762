use crate::cli::commands::parse_category;
use crate::cli::parser::{Cli, Commands, TimerAction};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::Feature;
use crate::core::timer::TimerLogic;
use crate::errors::{AppError, AppResult};
use crate::models::timer::TimerState;
use crate::ui::messages::{info, success};
use crate::ui::views::render_timer;
use crate::utils::time::{format_hours, format_optional_hhmm};
use chrono::Utc;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer { action } = &cli.command {
        let mut session = Session::open(cli, cfg)?;
        session.require(Feature::Timer)?;

        match action {
            TimerAction::Start {
                employee,
                category,
                project,
            } => start(
                &mut session,
                cfg,
                employee.as_deref(),
                category.as_deref(),
                project.as_deref(),
            )?,
            TimerAction::Stop { description } => stop(&mut session, description.as_deref())?,
            TimerAction::Status { watch } => status(&session, *watch)?,
        }
    }

    Ok(())
}

fn start(
    session: &mut Session,
    cfg: &Config,
    employee: Option<&str>,
    category: Option<&str>,
    project: Option<&str>,
) -> AppResult<()> {
    let employee = session.employee(employee)?;
    let category = parse_category(category.unwrap_or(&cfg.default_category))?;
    let project = project.unwrap_or(&cfg.default_project);

    let timer = TimerLogic::start(
        session.state.timer.as_ref(),
        &employee,
        category,
        project,
        Utc::now(),
    )?;

    success(format!(
        "Timer started for {} ({} | {})",
        timer.employee_name,
        timer.category.label(),
        timer.project
    ));

    session.state.timer = Some(timer);
    session.state.save_timer(&session.store())?;
    Ok(())
}

fn stop(session: &mut Session, description: Option<&str>) -> AppResult<()> {
    let timer = session.state.timer.take().ok_or(AppError::TimerNotRunning)?;
    let now = Utc::now();

    let new = TimerLogic::stop(&timer, now, description);
    let entry = session.state.book.add(new, now).clone();

    let store = session.pool.store();
    session.state.save_entries(&store, now)?;
    session.state.save_timer(&store)?;

    session.audit(
        "timer_stop",
        &format!("#{}", entry.id),
        &format!(
            "{} {} {}-{} {}h",
            entry.employee_name,
            entry.date,
            format_optional_hhmm(entry.start_time),
            format_optional_hhmm(entry.end_time),
            entry.duration_hours
        ),
    );

    success(format!(
        "Timer stopped: {}h recorded as entry #{} ({} → {})",
        format_hours(entry.duration_hours),
        entry.id,
        format_optional_hhmm(entry.start_time),
        format_optional_hhmm(entry.end_time)
    ));
    Ok(())
}

fn status(session: &Session, watch: bool) -> AppResult<()> {
    let Some(timer) = &session.state.timer else {
        info("No timer is running.");
        return Ok(());
    };

    if !watch {
        print!("{}", render_line(timer));
        return Ok(());
    }

    // Redraw in place once per second until interrupted.
    loop {
        print!("\r{}", render_line(timer).trim_end());
        io::stdout().flush()?;
        thread::sleep(Duration::from_secs(1));
    }
}

fn render_line(timer: &TimerState) -> String {
    render_timer(timer, TimerLogic::elapsed(timer, Utc::now()))
}
