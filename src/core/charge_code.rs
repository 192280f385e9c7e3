use crate::core::auth::Auth;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_charge_code, insert_charge_code, update_charge_code};
use crate::errors::{AppError, AppResult};
use crate::models::charge_code::{ChargeCode, MAX_CODE_LEN, MAX_DESCRIPTION_LEN};
use crate::models::user::User;
use crate::ui::messages::success;

fn validate_code(code: &str) -> AppResult<()> {
    let len = code.chars().count();
    if len == 0 || len > MAX_CODE_LEN {
        return Err(AppError::InvalidChargeCode(format!(
            "code must be 1..={} characters, got {}",
            MAX_CODE_LEN, len
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> AppResult<()> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(AppError::InvalidChargeCode(format!(
            "description must be 1..={} characters, got {}",
            MAX_DESCRIPTION_LEN, len
        )));
    }
    Ok(())
}

pub struct ChargeCodeLogic;

impl ChargeCodeLogic {
    pub fn add(
        pool: &mut DbPool,
        actor: &User,
        code: &str,
        description: &str,
    ) -> AppResult<ChargeCode> {
        Auth::require_admin(actor)?;

        let code = code.trim();
        let description = description.trim();
        validate_code(code)?;
        validate_description(description)?;

        let id = insert_charge_code(&pool.conn, code, description)?;

        audit(&pool.conn, "code_add", code, description);
        success(format!("Charge code {} created", code));

        Ok(ChargeCode {
            id,
            code: code.to_string(),
            description: description.to_string(),
            is_active: true,
        })
    }

    /// Change description and/or active flag. Deactivated codes keep their
    /// historical entries.
    pub fn update(
        pool: &mut DbPool,
        actor: &User,
        code: &str,
        description: Option<&str>,
        active: Option<bool>,
    ) -> AppResult<ChargeCode> {
        Auth::require_admin(actor)?;

        let mut cc = find_charge_code(&pool.conn, code)?
            .ok_or_else(|| AppError::UnknownChargeCode(code.to_string()))?;

        if let Some(d) = description {
            let d = d.trim();
            validate_description(d)?;
            cc.description = d.to_string();
        }
        if let Some(a) = active {
            cc.is_active = a;
        }

        update_charge_code(&pool.conn, &cc)?;

        let state = if cc.is_active { "active" } else { "inactive" };
        audit(
            &pool.conn,
            "code_update",
            &cc.code,
            &format!("{} ({})", cc.description, state),
        );
        success(format!("Charge code {} updated ({})", cc.code, state));

        Ok(cc)
    }
}
