use crate::core::period::PolicyKind;
use crate::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rTimesheet
/// Employee timesheets with period completion metrics, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Timesheet CLI: log hours per charge code and track period completion using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as the given user (e-mail); overrides `user` in the config file
    #[arg(global = true, long = "as", value_name = "EMAIL")]
    pub as_user: Option<String>,

    /// Pin "today" to a fixed date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

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

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage charge codes
    Code {
        #[command(subcommand)]
        action: CodeCommands,
    },

    /// Add or update the hours logged on a charge code for a day
    Add {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        /// Charge code (e.g. PROJ-001)
        code: String,

        /// Hours worked (1-7)
        #[arg(allow_negative_numbers = true)]
        hours: i64,
    },

    /// Delete one entry, or remove a charge code from a period
    #[command(group(
        ArgGroup::new("target")
            .required(true)
            .args(["date", "period"])
    ))]
    Del {
        /// Date of the entry to delete (YYYY-MM-DD)
        #[arg(requires = "entry_code", conflicts_with = "period")]
        date: Option<String>,

        /// Charge code of the entry to delete
        #[arg(value_name = "CODE")]
        entry_code: Option<String>,

        /// Owner of the entry (admins only)
        #[arg(long = "user", value_name = "EMAIL", conflicts_with = "period")]
        user: Option<String>,

        /// Charge code to remove from every day of --period
        #[arg(long = "code", value_name = "CODE", requires = "period")]
        code: Option<String>,

        /// Range for bulk removal (YYYY, YYYY-MM, YYYY-MM-DD or start:end)
        #[arg(long = "period", value_name = "RANGE", requires = "code")]
        period: Option<String>,
    },

    /// List time entries day by day with their calendar status
    List {
        /// Range (YYYY, YYYY-MM, YYYY-MM-DD or start:end); defaults to the current period
        #[arg(long, short)]
        period: Option<String>,

        /// Show another user's entries (admins only)
        #[arg(long, value_name = "EMAIL")]
        user: Option<String>,
    },

    /// Show the timesheet period containing a date
    Period {
        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Period policy; defaults to the configured one
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,

        /// Shift by N periods (negative = earlier)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },

    /// Aggregated completion metrics for a period (admins only)
    Metrics {
        /// Period start (YYYY-MM-DD); defaults to the current semi-monthly period
        #[arg(long)]
        start: Option<String>,

        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Print the JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Rolling two-week dashboard (admins only)
    Dashboard {
        /// Print the JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Export time entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        email: String,

        #[arg(long)]
        name: Option<String>,

        /// Role (employee or admin); repeat for several
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,
    },

    /// List users with their entry counts (admins only)
    List {
        /// Case-insensitive filter on e-mail or name
        #[arg(long)]
        search: Option<String>,

        /// Only users holding the EMPLOYEE role
        #[arg(long)]
        employees: bool,
    },
}

#[derive(Subcommand)]
pub enum CodeCommands {
    /// Create a charge code (admins only)
    Add { code: String, description: String },

    /// List charge codes
    List {
        /// Include inactive codes
        #[arg(long)]
        all: bool,
    },

    /// Change a charge code (admins only)
    Update {
        code: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        #[arg(long)]
        inactive: bool,
    },
}
