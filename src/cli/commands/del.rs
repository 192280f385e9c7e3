use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date, parse_range};

/// Handle the `del` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date,
        entry_code,
        user,
        code,
        period,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        match (date, entry_code, code, period) {
            (Some(d), Some(c), _, _) => {
                let date = parse_date(d)?;
                DeleteLogic::apply(&mut pool, &actor, date, c, user.as_deref())?;
            }
            (_, _, Some(c), Some(range)) => {
                let (start, end) = parse_range(range)?;
                DeleteLogic::remove_charge_code(&mut pool, &actor, c, start, end)?;
            }
            _ => {
                return Err(AppError::Other(
                    "use `del <date> <code>` or `del --code <code> --period <range>`".into(),
                ));
            }
        }
    }

    Ok(())
}
