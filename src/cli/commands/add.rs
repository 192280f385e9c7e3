use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::auth::Auth;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::parse_date;

/// Handle the `add` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, code, hours } = cmd {
        let date = parse_date(date)?;
        let mut pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        AddLogic::apply(&mut pool, &actor, date, code, *hours)?;
    }

    Ok(())
}
