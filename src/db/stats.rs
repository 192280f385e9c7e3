use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts and entry date range of the database.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DbStats {
    pub users: i64,
    pub charge_codes: i64,
    pub active_charge_codes: i64,
    pub entries: i64,
    pub total_hours: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

fn count(pool: &DbPool, sql: &str) -> AppResult<i64> {
    Ok(pool.conn.query_row(sql, [], |row| row.get(0))?)
}

pub fn collect(pool: &DbPool) -> AppResult<DbStats> {
    let (first_date, last_date): (Option<String>, Option<String>) = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM time_entries", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?
        .unwrap_or((None, None));

    Ok(DbStats {
        users: count(pool, "SELECT COUNT(*) FROM users")?,
        charge_codes: count(pool, "SELECT COUNT(*) FROM charge_codes")?,
        active_charge_codes: count(pool, "SELECT COUNT(*) FROM charge_codes WHERE is_active = 1")?,
        entries: count(pool, "SELECT COUNT(*) FROM time_entries")?,
        total_hours: count(pool, "SELECT COALESCE(SUM(hours), 0) FROM time_entries")?,
        first_date,
        last_date,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let s = collect(pool)?;

    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, s.users, RESET);
    println!(
        "{}• Charge codes:{} {}{}{} ({} active)",
        CYAN, RESET, GREEN, s.charge_codes, RESET, s.active_charge_codes
    );
    println!(
        "{}• Time entries:{} {}{}{} ({}h)",
        CYAN, RESET, GREEN, s.entries, RESET, s.total_hours
    );

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", s.first_date.as_deref().unwrap_or(&dash));
    println!("    to:   {}", s.last_date.as_deref().unwrap_or(&dash));

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use rusqlite::Connection;

    #[test]
    fn empty_database_has_no_range() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let pool = DbPool { conn };

        let s = collect(&pool).unwrap();
        assert_eq!(s.entries, 0);
        assert_eq!(s.total_hours, 0);
        assert_eq!(s.first_date, None);
    }
}
