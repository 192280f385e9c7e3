use crate::errors::{AppError, AppResult};
use crate::models::charge_code::ChargeCode;
use crate::models::role::Role;
use crate::models::time_entry::{EntryDetail, TimeEntry};
use crate::models::user::User;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ---------------------------
// Users
// ---------------------------

pub fn map_user_row(row: &Row) -> Result<User> {
    let roles_str: String = row.get("roles")?;
    let roles = Role::split(&roles_str)
        .ok_or_else(|| conversion_error(AppError::InvalidRole(roles_str.clone())))?;

    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        roles,
    })
}

pub fn insert_user(
    conn: &Connection,
    email: &str,
    name: Option<&str>,
    roles: &[Role],
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO users (email, name, roles, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![email, name, Role::join(roles), Local::now().to_rfc3339()],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Duplicate(format!("user '{email}'"))),
        Err(e) => Err(e.into()),
    }
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM users WHERE email = ?1 COLLATE NOCASE")?;
    Ok(stmt.query_row([email.trim()], map_user_row).optional()?)
}

/// Users ordered by e-mail, optionally filtered by a case-insensitive
/// substring of e-mail or name.
pub fn list_users(conn: &Connection, search: Option<&str>) -> AppResult<Vec<User>> {
    let pattern = search.map(|s| format!("%{}%", s.trim().to_lowercase()));

    let mut stmt = conn.prepare(
        "SELECT * FROM users
         WHERE ?1 IS NULL
            OR lower(email) LIKE ?1
            OR lower(coalesce(name, '')) LIKE ?1
         ORDER BY email ASC",
    )?;

    let rows = stmt.query_map([pattern], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_entries_per_user(conn: &Connection) -> AppResult<HashMap<i64, i64>> {
    let mut stmt = conn.prepare("SELECT user_id, COUNT(*) FROM time_entries GROUP BY user_id")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;

    let mut out = HashMap::new();
    for r in rows {
        let (user_id, count) = r?;
        out.insert(user_id, count);
    }
    Ok(out)
}

// ---------------------------
// Charge codes
// ---------------------------

pub fn map_charge_code_row(row: &Row) -> Result<ChargeCode> {
    Ok(ChargeCode {
        id: row.get("id")?,
        code: row.get("code")?,
        description: row.get("description")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
    })
}

pub fn insert_charge_code(conn: &Connection, code: &str, description: &str) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO charge_codes (code, description, is_active) VALUES (?1, ?2, 1)",
        params![code, description],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => {
            Err(AppError::Duplicate(format!("charge code '{code}'")))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_charge_code(conn: &Connection, code: &str) -> AppResult<Option<ChargeCode>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM charge_codes WHERE code = ?1")?;
    Ok(stmt.query_row([code], map_charge_code_row).optional()?)
}

/// Charge codes ordered by code. Inactive codes only when requested.
pub fn list_charge_codes(conn: &Connection, include_inactive: bool) -> AppResult<Vec<ChargeCode>> {
    let sql = if include_inactive {
        "SELECT * FROM charge_codes ORDER BY code ASC"
    } else {
        "SELECT * FROM charge_codes WHERE is_active = 1 ORDER BY code ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_charge_code_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_charge_code(conn: &Connection, cc: &ChargeCode) -> AppResult<()> {
    conn.execute(
        "UPDATE charge_codes SET description = ?1, is_active = ?2 WHERE id = ?3",
        params![cc.description, if cc.is_active { 1 } else { 0 }, cc.id],
    )?;
    Ok(())
}

// ---------------------------
// Time entries
// ---------------------------

pub fn map_entry_row(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        charge_code_id: row.get("charge_code_id")?,
        date,
        hours: row.get("hours")?,
    })
}

/// Insert or replace the single entry for (user, charge code, date).
pub fn upsert_entry(
    conn: &Connection,
    user_id: i64,
    charge_code_id: i64,
    date: NaiveDate,
    hours: u32,
) -> AppResult<TimeEntry> {
    let now = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO time_entries (user_id, charge_code_id, date, hours, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         ON CONFLICT(user_id, charge_code_id, date)
         DO UPDATE SET hours = excluded.hours, updated_at = excluded.updated_at",
        params![user_id, charge_code_id, fmt_date(date), hours, now],
    )?;

    find_entry(conn, user_id, charge_code_id, date)?.ok_or_else(|| {
        AppError::Other(format!("entry for {} vanished after upsert", fmt_date(date)))
    })
}

pub fn find_entry(
    conn: &Connection,
    user_id: i64,
    charge_code_id: i64,
    date: NaiveDate,
) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM time_entries
         WHERE user_id = ?1 AND charge_code_id = ?2 AND date = ?3",
    )?;
    Ok(stmt
        .query_row(params![user_id, charge_code_id, fmt_date(date)], map_entry_row)
        .optional()?)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    Ok(())
}

/// Entries dated `start..=end`, optionally restricted to one user or one
/// charge code.
pub fn load_entries_filtered(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    user_id: Option<i64>,
    charge_code_id: Option<i64>,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR user_id = ?3)
           AND (?4 IS NULL OR charge_code_id = ?4)
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![fmt_date(start), fmt_date(end), user_id, charge_code_id],
        map_entry_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_entries_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    user_id: Option<i64>,
) -> AppResult<Vec<TimeEntry>> {
    load_entries_filtered(conn, start, end, user_id, None)
}

fn map_detail_row(row: &Row) -> Result<EntryDetail> {
    Ok(EntryDetail {
        id: row.get(0)?,
        date: row.get(1)?,
        email: row.get(2)?,
        name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        code: row.get(4)?,
        description: row.get(5)?,
        hours: row.get(6)?,
    })
}

/// Joined entry rows, ordered by date then e-mail then code.
pub fn load_entry_details(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
    user_id: Option<i64>,
) -> AppResult<Vec<EntryDetail>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(fmt_date(s)), Some(fmt_date(e))),
        None => (None, None),
    };

    let mut stmt = conn.prepare(
        "SELECT e.id, e.date, u.email, u.name, c.code, c.description, e.hours
         FROM time_entries e
         JOIN users u ON u.id = e.user_id
         JOIN charge_codes c ON c.id = e.charge_code_id
         WHERE (?1 IS NULL OR e.date >= ?1)
           AND (?2 IS NULL OR e.date <= ?2)
           AND (?3 IS NULL OR e.user_id = ?3)
         ORDER BY e.date ASC, u.email ASC, c.code ASC",
    )?;

    let rows = stmt.query_map(params![start, end, user_id], map_detail_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
