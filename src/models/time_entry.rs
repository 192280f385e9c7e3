use chrono::NaiveDate;
use serde::Serialize;

pub const MIN_ENTRY_HOURS: u32 = 1;
pub const MAX_ENTRY_HOURS: u32 = 7;

/// Hours logged by one user against one charge code on one calendar day.
/// At most one entry exists per (user_id, charge_code_id, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    pub charge_code_id: i64,
    pub date: NaiveDate,
    pub hours: u32,
}

impl TimeEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn hours_in_range(hours: i64) -> bool {
        (MIN_ENTRY_HOURS as i64..=MAX_ENTRY_HOURS as i64).contains(&hours)
    }
}

/// A time entry joined with its user and charge code, as listed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDetail {
    pub id: i64,
    pub date: String,
    pub email: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub hours: u32,
}
