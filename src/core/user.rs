use crate::core::auth::Auth;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{count_entries_per_user, find_user_by_email, insert_user, list_users};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;
use crate::ui::messages::success;

pub struct UserLogic;

impl UserLogic {
    /// Register a user. The very first user may be created without an actor;
    /// after that only administrators can add users.
    pub fn add(
        pool: &mut DbPool,
        actor_email: Option<&str>,
        email: &str,
        name: Option<&str>,
        roles: &[String],
    ) -> AppResult<User> {
        let bootstrap = list_users(&pool.conn, None)?.is_empty();
        if !bootstrap {
            let actor = Auth::actor(pool, actor_email)?;
            Auth::require_admin(&actor)?;
        }

        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::InvalidEmail(email.to_string()));
        }

        let mut parsed: Vec<Role> = Vec::new();
        for r in roles {
            let role = Role::from_code(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?;
            if !parsed.contains(&role) {
                parsed.push(role);
            }
        }
        if parsed.is_empty() {
            parsed.push(Role::Employee);
        }

        let name = name.map(str::trim).filter(|n| !n.is_empty());
        insert_user(&pool.conn, email, name, &parsed)?;

        let user = find_user_by_email(&pool.conn, email)?
            .ok_or_else(|| AppError::UnknownUser(email.to_string()))?;

        audit(
            &pool.conn,
            "user_add",
            &user.email,
            &format!("Added user with roles {}", Role::join(&user.roles)),
        );
        success(format!("User {} added ({})", user.email, Role::join(&user.roles)));

        Ok(user)
    }

    /// Users with their total entry count, ordered by e-mail. Admin only.
    /// `employees_only` keeps the users holding the EMPLOYEE role.
    pub fn list(
        pool: &DbPool,
        actor: &User,
        search: Option<&str>,
        employees_only: bool,
    ) -> AppResult<Vec<(User, i64)>> {
        Auth::require_admin(actor)?;

        let counts = count_entries_per_user(&pool.conn)?;
        Ok(list_users(&pool.conn, search)?
            .into_iter()
            .filter(|u| !employees_only || u.is_employee())
            .map(|u| {
                let n = counts.get(&u.id).copied().unwrap_or(0);
                (u, n)
            })
            .collect())
    }
}
