use crate::cli::parser::{CodeCommands, Commands};
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::charge_code::ChargeCodeLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_charge_codes;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{GREEN, GREY, paint};
use crate::utils::formatting::wrap_text;
use crate::utils::table::{Column, Table};

const DESCRIPTION_WIDTH: usize = 48;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Code { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            CodeCommands::Add { code, description } => {
                let actor = Auth::actor(&pool, cfg.user.as_deref())?;
                ChargeCodeLogic::add(&mut pool, &actor, code, description)?;
            }
            CodeCommands::Update {
                code,
                description,
                active,
                inactive,
            } => {
                let actor = Auth::actor(&pool, cfg.user.as_deref())?;
                let flag = match (*active, *inactive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                ChargeCodeLogic::update(&mut pool, &actor, code, description.as_deref(), flag)?;
            }
            CodeCommands::List { all } => {
                let codes = list_charge_codes(&pool.conn, *all)?;
                if codes.is_empty() {
                    info("No charge codes defined.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::left("Code"),
                    Column::left("Description"),
                    Column::left("Status"),
                ]);
                for cc in &codes {
                    let status = if cc.is_active {
                        paint(GREEN, "active")
                    } else {
                        paint(GREY, "inactive")
                    };
                    let lines = wrap_text(&cc.description, DESCRIPTION_WIDTH);
                    for (i, line) in lines.iter().enumerate() {
                        if i == 0 {
                            table.add_row(vec![cc.code.clone(), line.clone(), status.clone()]);
                        } else {
                            table.add_row(vec![String::new(), line.clone(), String::new()]);
                        }
                    }
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
