//! Seeds the first administrator so a fresh installation can be managed.

use courtside_core::{
    models::user::{Household, NewUser, Role, UserStatus},
    validation::{normalize_email, validate_email, validate_password},
};
use courtside_db::repositories;
use eyre::{eyre, Result};
use sqlx::PgPool;
use tracing::info;

use crate::{config::AdminSeed, middleware::auth};

/// Household recorded for the seeded administrator.
const ADMIN_HOUSEHOLD: (&str, &str) = ("Administración", "0");

/// Turns the seed into an approved administrator account.
pub fn admin_account(seed: &AdminSeed) -> Result<NewUser> {
    validate_email(&seed.email).map_err(|e| eyre!("Invalid ADMIN_EMAIL: {}", e))?;
    validate_password(&seed.password).map_err(|e| eyre!("Invalid ADMIN_PASSWORD: {}", e))?;

    Ok(NewUser {
        name: seed.name.trim().to_string(),
        email: normalize_email(&seed.email),
        password: seed.password.clone(),
        role: Role::Admin,
        status: UserStatus::Approved,
        household: Household::new(ADMIN_HOUSEHOLD.0, ADMIN_HOUSEHOLD.1),
    })
}

/// Creates the seed administrator when the database has no administrator.
///
/// # Returns
///
/// * `Result<bool>` - Whether an account was created
pub async fn ensure_admin(pool: &PgPool, seed: Option<&AdminSeed>) -> Result<bool> {
    if repositories::user::count_admins(pool).await? > 0 {
        return Ok(false);
    }

    let Some(seed) = seed else {
        tracing::warn!(
            "No administrator exists; set ADMIN_EMAIL and ADMIN_PASSWORD to create one"
        );
        return Ok(false);
    };

    let account = admin_account(seed)?;
    if let Some(existing) = repositories::user::get_user_by_email(pool, &account.email).await? {
        repositories::user::update_user_role(pool, existing.id, Role::Admin).await?;
        repositories::user::update_user_status(pool, existing.id, UserStatus::Approved).await?;
        info!("Promoted existing account {} to administrator", account.email);
        return Ok(true);
    }

    let password_hash = auth::hash_password(&account.password)?;
    repositories::user::create_user(pool, &account, &password_hash).await?;

    info!("Created administrator account {}", account.email);
    Ok(true)
}
