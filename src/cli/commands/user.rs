use crate::cli::parser::{Commands, UserCommands};
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::user::UserLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            UserCommands::Add { email, name, roles } => {
                UserLogic::add(
                    &mut pool,
                    cfg.user.as_deref(),
                    email,
                    name.as_deref(),
                    roles,
                )?;
            }
            UserCommands::List { search, employees } => {
                let actor = Auth::actor(&pool, cfg.user.as_deref())?;
                let users = UserLogic::list(&pool, &actor, search.as_deref(), *employees)?;

                if users.is_empty() {
                    info("No users found.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::left("Email"),
                    Column::left("Name"),
                    Column::left("Roles"),
                    Column::right("Entries"),
                ]);
                for (u, entries) in &users {
                    table.add_row(vec![
                        u.email.clone(),
                        u.name.clone().unwrap_or_else(|| "-".into()),
                        Role::join(&u.roles),
                        entries.to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
