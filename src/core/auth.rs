//! Acting-user resolution and capability checks.
//!
//! Identity comes from `--as <email>` or the `user` config field; there is no
//! password or session handling in the CLI.

use crate::db::pool::DbPool;
use crate::db::queries::find_user_by_email;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;

pub struct Auth;

impl Auth {
    /// Load the acting user, failing with `Unauthorized` when none is set or
    /// the e-mail is not registered.
    pub fn actor(pool: &DbPool, email: Option<&str>) -> AppResult<User> {
        let email = email.ok_or_else(|| {
            AppError::Unauthorized(
                "no acting user: pass --as <email> or set `user` in the config file".into(),
            )
        })?;

        find_user_by_email(&pool.conn, email)?
            .ok_or_else(|| AppError::Unauthorized(format!("unknown user '{email}'")))
    }

    /// Administrative capability, checked before any aggregation runs.
    pub fn require_admin(actor: &User) -> AppResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!(
                "'{}' does not have the ADMIN role",
                actor.email
            )))
        }
    }

    /// The owner of a record, or an administrator.
    pub fn require_owner_or_admin(actor: &User, owner_id: i64) -> AppResult<()> {
        if actor.id == owner_id || actor.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!(
                "'{}' cannot modify another user's entries",
                actor.email
            )))
        }
    }
}
