use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_charge_code, upsert_entry};
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntry;
use crate::models::user::User;
use crate::ui::messages::success;
use chrono::NaiveDate;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Upsert the actor's entry for (charge code, date). A second call with
    /// the same key replaces the hours.
    pub fn apply(
        pool: &mut DbPool,
        actor: &User,
        date: NaiveDate,
        code: &str,
        hours: i64,
    ) -> AppResult<TimeEntry> {
        if !TimeEntry::hours_in_range(hours) {
            return Err(AppError::InvalidHours(hours));
        }

        let cc = find_charge_code(&pool.conn, code)?
            .ok_or_else(|| AppError::UnknownChargeCode(code.to_string()))?;

        if !cc.is_active {
            return Err(AppError::InvalidChargeCode(format!(
                "{} is inactive and cannot receive new hours",
                cc.code
            )));
        }

        let entry = upsert_entry(&pool.conn, actor.id, cc.id, date, hours as u32)?;

        audit(
            &pool.conn,
            "add",
            &cc.code,
            &format!("{} logged {}h on {}", actor.email, entry.hours, entry.date_str()),
        );

        success(format!(
            "{}h on {} recorded for {} ({})",
            entry.hours,
            entry.date_str(),
            cc.code,
            actor.email
        ));

        Ok(entry)
    }
}
