use crate::db::pool::DbPool;
use crate::db::queries::load_entry_details;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::models::user::User;
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use chrono::NaiveDate;
use std::path::Path;

/// High level export of time entries.
pub struct ExportLogic;

impl ExportLogic {
    /// Export time entries joined with user e-mail and charge code.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a range expression (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or `start:end`)
    ///
    /// Administrators export every user; everybody else only their own rows.
    pub fn export(
        pool: &DbPool,
        actor: &User,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let scope = if actor.is_admin() { None } else { Some(actor.id) };
        let entries = load_entry_details(&pool.conn, bounds, scope)?;

        if entries.is_empty() {
            warning("No time entries found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&entries, path)?,
            ExportFormat::Json => export_json(&entries, path)?,
        }

        Ok(entries.len())
    }
}
