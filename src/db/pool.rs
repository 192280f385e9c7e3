//! SQLite connection wrapper (lightweight for CLI usage).

use crate::core::metrics::RecordStore;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::charge_code::ChargeCode;
use crate::models::time_entry::TimeEntry;
use crate::models::user::User;
use chrono::NaiveDate;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}

impl RecordStore for DbPool {
    fn employees(&self) -> AppResult<Vec<User>> {
        Ok(queries::list_users(&self.conn, None)?
            .into_iter()
            .filter(User::is_employee)
            .collect())
    }

    fn charge_codes(&self) -> AppResult<Vec<ChargeCode>> {
        queries::list_charge_codes(&self.conn, true)
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<TimeEntry>> {
        queries::load_entries_between(&self.conn, start, end, None)
    }
}
