//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid hours value {0}: hours must be between 1 and 7")]
    InvalidHours(i64),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),

    #[error("Invalid charge code: {0}")]
    InvalidChargeCode(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown charge code: {0}")]
    UnknownChargeCode(String),

    #[error("No time entry for {code} on {date}")]
    EntryNotFound { code: String, date: String },

    #[error("Already exists: {0}")]
    Duplicate(String),

    // ---------------------------
    // Authorization
    // ---------------------------
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ---------------------------
    // Bulk operations
    // ---------------------------
    #[error("Partial delete: {deleted} entries deleted, {failed} failed")]
    PartialDelete { deleted: usize, failed: usize },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
