use crate::core::auth::Auth;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_entry, find_charge_code, find_entry, find_user_by_email, load_entries_filtered,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one entry. `owner` defaults to the actor; deleting someone
    /// else's entry needs the ADMIN role.
    pub fn apply(
        pool: &mut DbPool,
        actor: &User,
        date: NaiveDate,
        code: &str,
        owner: Option<&str>,
    ) -> AppResult<()> {
        let owner = match owner {
            Some(email) => find_user_by_email(&pool.conn, email)?
                .ok_or_else(|| AppError::UnknownUser(email.to_string()))?,
            None => actor.clone(),
        };

        Auth::require_owner_or_admin(actor, owner.id)?;

        let cc = find_charge_code(&pool.conn, code)?
            .ok_or_else(|| AppError::UnknownChargeCode(code.to_string()))?;

        let date_str = date.format("%Y-%m-%d").to_string();
        let entry = find_entry(&pool.conn, owner.id, cc.id, date)?.ok_or_else(|| {
            AppError::EntryNotFound {
                code: cc.code.clone(),
                date: date_str.clone(),
            }
        })?;

        delete_entry(&pool.conn, entry.id)?;

        audit(
            &pool.conn,
            "del",
            &cc.code,
            &format!("{} removed {}h of {} on {}", actor.email, entry.hours, owner.email, date_str),
        );
        info(format!("Deleted {} entry for {} on {}", cc.code, owner.email, date_str));
        Ok(())
    }

    /// Remove a charge code from the actor's timesheet over `start..=end`.
    ///
    /// Each entry is deleted on its own: a failure leaves the others deleted
    /// and is reported as `PartialDelete`.
    pub fn remove_charge_code(
        pool: &mut DbPool,
        actor: &User,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<usize> {
        let cc = find_charge_code(&pool.conn, code)?
            .ok_or_else(|| AppError::UnknownChargeCode(code.to_string()))?;

        let entries = load_entries_filtered(&pool.conn, start, end, Some(actor.id), Some(cc.id))?;
        if entries.is_empty() {
            warning(format!("No {} entries between {} and {}", cc.code, start, end));
            return Ok(0);
        }

        let mut deleted = 0;
        let mut failed = 0;
        for entry in &entries {
            match delete_entry(&pool.conn, entry.id) {
                Ok(()) => deleted += 1,
                Err(e) => {
                    warning(format!("Could not delete entry on {}: {}", entry.date_str(), e));
                    failed += 1;
                }
            }
        }

        audit(
            &pool.conn,
            "del",
            &cc.code,
            &format!(
                "{} removed {} from {} → {} ({} deleted, {} failed)",
                actor.email, cc.code, start, end, deleted, failed
            ),
        );

        if failed > 0 {
            return Err(AppError::PartialDelete { deleted, failed });
        }

        info(format!("Removed {} {} entries", deleted, cc.code));
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::{insert_charge_code, insert_user, load_entries_between, upsert_entry};
    use crate::models::role::Role;
    use rusqlite::Connection;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pool_with_week() -> (DbPool, User) {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let uid = insert_user(&conn, "alice@example.com", None, &[Role::Employee]).unwrap();
        let cid = insert_charge_code(&conn, "PROJ-001", "Alpha").unwrap();
        for day in ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07"] {
            upsert_entry(&conn, uid, cid, d(day), 7).unwrap();
        }
        let actor = find_user_by_email(&conn, "alice@example.com").unwrap().unwrap();
        (DbPool { conn }, actor)
    }

    #[test]
    fn remove_charge_code_deletes_every_entry_in_range() {
        let (mut pool, actor) = pool_with_week();

        let n = DeleteLogic::remove_charge_code(
            &mut pool,
            &actor,
            "PROJ-001",
            d("2024-03-01"),
            d("2024-03-31"),
        )
        .unwrap();

        assert_eq!(n, 4);
        let left = load_entries_between(&pool.conn, d("2024-03-01"), d("2024-03-31"), None).unwrap();
        assert!(left.is_empty());
    }

    #[test]
    fn failed_delete_keeps_the_others_and_reports_partial() {
        let (mut pool, actor) = pool_with_week();
        pool.conn
            .execute_batch(
                "CREATE TRIGGER lock_entry BEFORE DELETE ON time_entries
                 WHEN OLD.date = '2024-03-06'
                 BEGIN SELECT RAISE(ABORT, 'locked'); END;",
            )
            .unwrap();

        let res = DeleteLogic::remove_charge_code(
            &mut pool,
            &actor,
            "PROJ-001",
            d("2024-03-01"),
            d("2024-03-31"),
        );

        assert!(matches!(
            res,
            Err(AppError::PartialDelete {
                deleted: 3,
                failed: 1
            })
        ));

        let left = load_entries_between(&pool.conn, d("2024-03-01"), d("2024-03-31"), None).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].date, d("2024-03-06"));
    }
}
