use crate::cli::parser::{AdminAction, Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::access::{AccessLogic, Feature};
use crate::core::settings::{SettingsLogic, SettingsUpdate};
use crate::core::stats::StatsLogic;
use crate::core::validation::ValidationLogic;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::confirm;
use crate::export::logic::{ExportLogic, SAMPLE_TIMESHEET};
use crate::ui::messages::{header, info, success, warning};
use crate::ui::views::{render_admin_stats, render_settings, render_validation};
use chrono::Utc;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Admin { action } = &cli.command {
        let mut session = Session::open(cli, cfg)?;

        return match action {
            AdminAction::Status => status(&session),
            AdminAction::Enroll { new_passphrase } => enroll(&mut session, new_passphrase),
            AdminAction::Settings {
                company,
                allow_edit,
                allow_delete,
                allow_employee_edit,
                allow_employee_delete,
                logo_url,
            } => {
                session.require(Feature::ConfigureCompany)?;
                settings(
                    &mut session,
                    SettingsUpdate {
                        company_name: company.clone(),
                        allow_edit: *allow_edit,
                        allow_delete: *allow_delete,
                        allow_employee_edit: *allow_employee_edit,
                        allow_employee_delete: *allow_employee_delete,
                        logo_url: logo_url.clone(),
                    },
                )
            }
            AdminAction::ResetSettings => {
                session.require(Feature::ConfigureCompany)?;
                SettingsLogic::reset_to_defaults(&mut session.state.app_config);
                session.state.save_app_config(&session.store())?;
                session.audit("reset_settings", "adminAppConfig", "Settings restored to defaults");
                success("Company settings restored to defaults.");
                print!("{}", render_settings(&session.state.app_config));
                Ok(())
            }
            AdminAction::Validate => {
                session.require(Feature::DataCleanup)?;
                let report = ValidationLogic::validate(session.state.book.entries());
                print!("{}", render_validation(&report));
                Ok(())
            }
            AdminAction::Clean => {
                session.require(Feature::DataCleanup)?;
                clean(&mut session)
            }
            AdminAction::Clear { force } => {
                session.require(Feature::DataCleanup)?;
                clear_all(&mut session, *force)
            }
            AdminAction::Sample { file, force } => {
                session.require(Feature::ConfigureCompany)?;
                ExportLogic::write_text(Path::new(file), SAMPLE_TIMESHEET, "Sample timesheet", *force)
            }
        };
    }

    Ok(())
}

fn status(session: &Session) -> AppResult<()> {
    println!("Access level : {}", session.level);
    println!(
        "Admin login  : {}",
        if session.state.credential.is_some() {
            "enrolled"
        } else {
            "not enrolled"
        }
    );

    if !session.is_admin() {
        if session.request.admin {
            info("Admin mode was requested but not granted.");
        }
        return Ok(());
    }

    println!();
    header("Company");
    let stats = StatsLogic::admin(&session.state.book);
    print!("{}", render_admin_stats(&stats, &session.state.app_config));
    Ok(())
}

/// First enrollment is open; replacing a passphrase needs admin mode.
fn enroll(session: &mut Session, passphrase: &str) -> AppResult<()> {
    if session.state.credential.is_some() && !session.is_admin() {
        return Err(AppError::PermissionDenied(
            "changing the admin passphrase requires admin mode".into(),
        ));
    }

    let replacing = session.state.credential.is_some();
    session.state.credential = Some(AccessLogic::enroll(passphrase, Utc::now())?);
    session.state.save_credential(&session.store())?;

    session.audit(
        "enroll",
        "adminCredential",
        if replacing {
            "Admin passphrase changed"
        } else {
            "Admin passphrase enrolled"
        },
    );
    success("Admin passphrase saved.");
    Ok(())
}

fn settings(session: &mut Session, update: SettingsUpdate) -> AppResult<()> {
    if !update.is_empty() {
        SettingsLogic::update(&mut session.state.app_config, update)?;
        session.state.save_app_config(&session.store())?;
        session.audit(
            "settings",
            "adminAppConfig",
            &format!("Company: {}", session.state.app_config.company_name),
        );
        success("Company settings saved.");
    }

    print!("{}", render_settings(&session.state.app_config));
    Ok(())
}

fn clean(session: &mut Session) -> AppResult<()> {
    let (zero, dups) = ValidationLogic::clean(&mut session.state.book);

    if zero + dups == 0 {
        info("Nothing to clean.");
        return Ok(());
    }

    session.state.save_entries(&session.pool.store(), Utc::now())?;

    let summary = format!("{} zero-hour entries, {} duplicates removed", zero, dups);
    session.audit("clean", "unifiedTimeEntries", &summary);
    success(format!("Cleanup completed: {}", summary));
    Ok(())
}

fn clear_all(session: &mut Session, force: bool) -> AppResult<()> {
    let count = session.state.book.len();
    if count == 0 {
        info("There are no entries.");
        return Ok(());
    }

    if !force {
        warning(format!(
            "Delete ALL {} entries of every employee? This action is irreversible.",
            count
        ));
        if !confirm("Confirm [y/N]: ")? {
            info("Operation cancelled.");
            return Ok(());
        }
    }

    let removed = session.state.book.clear();
    session.state.save_entries(&session.pool.store(), Utc::now())?;

    session.audit("clear", "all", &format!("{} entries removed", removed));
    success(format!("{} entries deleted.", removed));
    Ok(())
}
