use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeSettings;
use crate::ui::messages::{info, success};
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { name } = &cli.command {
        let mut session = Session::open(cli, cfg)?;

        let Some(name) = name else {
            match session.state.employee_name() {
                Some(n) => println!("👤 {}", n),
                None => info("No employee name set. Use `employee --name \"Your Name\"`."),
            }
            return Ok(());
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingEmployee);
        }

        session.state.employee = Some(EmployeeSettings {
            employee_name: name.to_string(),
            last_updated: Utc::now(),
        });
        session.state.save_employee(&session.store())?;
        success(format!("Employee set to {}", name));
    }

    Ok(())
}
