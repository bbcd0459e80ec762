use crate::export::{ExportFormat, TableFormat};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimeTracker
/// CLI application to track employee hours against pay periods with SQLite
#[derive(Parser)]
#[command(
    name = "rtimetracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee time tracker: timer, time entries, pay periods and holidays in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Launch URL; `?setup`, `?config=<code>` or `#admin-setup` request admin mode
    #[arg(global = true, long = "url", env = "RTIMETRACKER_URL")]
    pub url: Option<String>,

    /// Admin passphrase, checked when admin mode is requested
    #[arg(
        global = true,
        long = "passphrase",
        env = "RTIMETRACKER_ADMIN_PASSPHRASE",
        hide_env_values = true
    )]
    pub passphrase: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show or set the employee name remembered on this workstation
    Employee {
        #[arg(long = "name", help = "Employee name to remember")]
        name: Option<String>,
    },

    /// Start, stop or inspect the work timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// Add a manual time entry
    Add {
        #[arg(long, help = "Date of the entry (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, help = "work, overhead, travel, pto, sick, holiday, bereavement, jury")]
        category: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long, help = "Duration in hours (default: computed from --in/--out)")]
        hours: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, short = 'e', help = "Employee (default: remembered name)")]
        employee: Option<String>,
    },

    /// Edit a time entry by ID
    Edit {
        id: u64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long)]
        hours: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a time entry by ID
    Del {
        id: u64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Delete all of the current employee's entries
    Clear {
        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// List time entries
    List {
        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, help = "All employees (admin)")]
        all: bool,

        #[arg(long, short, help = "Pay period ID, or 'current'")]
        period: Option<String>,

        #[arg(long, help = "Filter by year/month/day or a custom range")]
        range: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long, help = "Show one summary row per day")]
        daily: bool,
    },

    /// Show hour statistics
    Stats {
        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, short, help = "Pay period ID, or 'current'")]
        period: Option<String>,
    },

    /// Import time entries from a CSV or JSON file
    Import {
        file: String,

        #[arg(long, short = 'e', help = "Employee for rows without one")]
        employee: Option<String>,
    },

    /// Export time entries
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, help = "All employees (admin)")]
        all: bool,

        #[arg(long, short, help = "Pay period ID, or 'current'")]
        period: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Pay period table
    Periods {
        #[command(subcommand)]
        action: PeriodsAction,
    },

    /// Holiday calendar and holiday selection
    Holidays {
        #[command(subcommand)]
        action: HolidaysAction,
    },

    /// Company administration (admin mode)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a new session
    Start {
        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        project: Option<String>,
    },

    /// Stop the running session and record it
    Stop {
        #[arg(long)]
        description: Option<String>,
    },

    /// Show the running session
    Status {
        #[arg(long, help = "Refresh every second until interrupted")]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum PeriodsAction {
    /// Show the active pay period table
    List,

    /// Show one pay period (default: the current one)
    Show {
        #[arg(long)]
        id: Option<String>,

        #[arg(long, help = "Period containing this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Replace the table from a CSV or JSON file
    Import { file: String },

    /// Export the active table
    Export {
        file: String,

        #[arg(long, value_enum, default_value = "json")]
        format: TableFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Write a sample pay period CSV
    Template {
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Generate consecutive fixed-length periods
    Generate {
        #[arg(long, help = "First period start (YYYY-MM-DD)")]
        start: String,

        #[arg(long, default_value_t = 26)]
        count: u32,

        #[arg(long, default_value_t = 14)]
        days: u32,

        #[arg(long, help = "Name of the generated table")]
        name: Option<String>,
    },

    /// Go back to the built-in table
    Reset,
}

#[derive(Subcommand)]
pub enum HolidaysAction {
    /// List holidays (optionally only those in a pay period)
    List {
        #[arg(long, short, help = "Pay period ID, or 'current'")]
        period: Option<String>,

        #[arg(long, short = 'e', help = "Mark holidays already taken by this employee")]
        employee: Option<String>,
    },

    /// Choose which holidays of a pay period to record
    Select {
        #[arg(long, short, help = "Pay period ID, or 'current'")]
        period: String,

        #[arg(long, value_delimiter = ',', help = "Holiday IDs to keep (others are removed)")]
        ids: Vec<String>,

        #[arg(long, short = 'e')]
        employee: Option<String>,
    },

    /// Replace the calendar from a CSV or JSON file
    Import { file: String },

    /// Export the active calendar
    Export {
        file: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: TableFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Write a sample holiday CSV
    Template {
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Go back to the built-in calendar
    Reset,
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Show the access level and company statistics
    Status,

    /// Set (or change) the admin passphrase
    Enroll {
        #[arg(long = "new-passphrase", env = "RTIMETRACKER_NEW_PASSPHRASE", hide_env_values = true)]
        new_passphrase: String,
    },

    /// Show or change company settings
    Settings {
        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        allow_edit: Option<bool>,

        #[arg(long)]
        allow_delete: Option<bool>,

        #[arg(long)]
        allow_employee_edit: Option<bool>,

        #[arg(long)]
        allow_employee_delete: Option<bool>,

        #[arg(long, help = "https image URL (licensed installations only); empty clears it")]
        logo_url: Option<String>,
    },

    /// Restore default company settings (license is kept)
    ResetSettings,

    /// Check all entries for missing fields and duplicates
    Validate,

    /// Remove zero-hour and duplicate entries
    Clean,

    /// Delete every entry of every employee
    Clear {
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Write a sample timesheet CSV
    Sample {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
