use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::Auth;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        let rows = ExportLogic::export(&pool, &actor, *format, file, range.as_deref(), *force)?;
        if rows > 0 {
            audit(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} exported {} entries to {}", actor.email, rows, file),
            );
        }
    }
    Ok(())
}
