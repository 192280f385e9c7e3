//! rTimesheet library root.
//! Exposes the CLI parser, the period & completion engine and the SQLite
//! record store.

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
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::period::{Clock, FixedClock, SystemClock};
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::date::parse_date;

/// Fixed clock for `--today`, system clock otherwise. An unparsable date
/// falls back to the system clock.
pub fn resolve_clock(today: Option<&str>) -> Box<dyn Clock> {
    match today {
        Some(raw) => match parse_date(raw) {
            Ok(d) => Box::new(FixedClock(d)),
            Err(_) => {
                warning(format!("Ignoring invalid --today '{raw}', using the system clock"));
                Box::new(SystemClock)
            }
        },
        None => Box::new(SystemClock),
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    use crate::cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::User { .. } => c::user::handle(&cli.command, cfg),
        Commands::Code { .. } => c::code::handle(&cli.command, cfg),
        Commands::Add { .. } => c::add::handle(&cli.command, cfg),
        Commands::Del { .. } => c::del::handle(&cli.command, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg, clock),
        Commands::Period { .. } => c::period::handle(&cli.command, cfg, clock),
        Commands::Metrics { .. } => c::metrics::handle(&cli.command, cfg, clock),
        Commands::Dashboard { .. } => c::dashboard::handle(&cli.command, cfg, clock),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // command line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(email) = &cli.as_user {
        cfg.user = Some(email.clone());
    }

    let clock = resolve_clock(cli.today.as_deref());

    dispatch(&cli, &cfg, clock.as_ref())
}
