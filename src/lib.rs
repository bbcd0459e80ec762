//! rTimeTracker library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(cli, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => commands::employee::handle(cli, cfg),
        Commands::Timer { .. } => commands::timer::handle(cli, cfg),
        Commands::Add { .. } => commands::add::handle(cli, cfg),
        Commands::Edit { .. } => commands::edit::handle(cli, cfg),
        Commands::Del { .. } => commands::del::handle(cli, cfg),
        Commands::Clear { .. } => commands::clear::handle(cli, cfg),
        Commands::List { .. } => commands::list::handle(cli, cfg),
        Commands::Stats { .. } => commands::stats::handle(cli, cfg),
        Commands::Import { .. } => commands::import::handle(cli, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Periods { .. } => commands::periods::handle(cli, cfg),
        Commands::Holidays { .. } => commands::holidays::handle(cli, cfg),
        Commands::Admin { .. } => commands::admin::handle(cli, cfg),
        Commands::Backup { .. } => commands::backup::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; `--db` wins over the configured path.
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
