//! Versioned schema migrations.
//!
//! Every migration is identified by a version string and recorded in the
//! `log` table (`operation = 'migration_applied'`, `target = <version>`), so
//! running the engine twice is a no-op.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240301_0001_create_users",
        description: "Created users table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            email       TEXT NOT NULL UNIQUE,
            name        TEXT,
            roles       TEXT NOT NULL DEFAULT 'EMPLOYEE',
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20240301_0002_create_charge_codes",
        description: "Created charge_codes table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS charge_codes (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            code         TEXT NOT NULL UNIQUE,
            description  TEXT NOT NULL,
            is_active    INTEGER NOT NULL DEFAULT 1
        );
        "#,
    },
    Migration {
        version: "20240301_0003_create_time_entries",
        description: "Created time_entries table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            charge_code_id  INTEGER NOT NULL REFERENCES charge_codes(id) ON DELETE CASCADE,
            date            TEXT NOT NULL,
            hours           INTEGER NOT NULL CHECK(hours BETWEEN 1 AND 7),
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL,
            UNIQUE(user_id, charge_code_id, date)
        );
        "#,
    },
    Migration {
        version: "20240315_0004_time_entries_indexes",
        description: "Added date indexes to time_entries",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_entries_date ON time_entries(date);
        CREATE INDEX IF NOT EXISTS idx_entries_user_date ON time_entries(user_id, date);
        "#,
    },
];

/// Ensure that the `log` table exists. It also stores the migration history.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    conn.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded in the log, in application order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
    }

    Ok(())
}
