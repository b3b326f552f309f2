use crate::models::DbUser;
use chrono::Utc;
use courtside_core::models::user::{Household, NewUser, Role, UserStatus};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    user: &NewUser,
    password_hash: &str,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating user: id={}, email={}, role={}, status={}",
        id, user.email, user.role, user.status
    );

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, status, manzana, villa, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, email, password_hash, role, status, manzana, villa, created_at
        "#,
    )
    .bind(id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(password_hash)
    .bind(user.role.as_str())
    .bind(user.status.as_str())
    .bind(&user.household.manzana)
    .bind(&user.household.villa)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by id: {}", id);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, status, manzana, villa, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Email lookup is case-insensitive.
pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, status, manzana, villa, created_at
        FROM users
        WHERE LOWER(email) = LOWER($1)
        "#,
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Users past the approval queue, optionally filtered by name or email.
pub async fn list_users(pool: &Pool<Postgres>, search: Option<&str>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, status, manzana, villa, created_at
        FROM users
        WHERE status <> 'pending'
          AND ($1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1)
        ORDER BY name ASC
        "#,
    )
    .bind(search.map(super::contains_pattern))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn list_pending_users(pool: &Pool<Postgres>, search: Option<&str>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, status, manzana, villa, created_at
        FROM users
        WHERE status = 'pending'
          AND ($1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(search.map(super::contains_pattern))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn list_all_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, status, manzana, villa, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Ids of approved administrators, the audience of staff notifications.
pub async fn list_admin_ids(pool: &Pool<Postgres>) -> Result<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM users
        WHERE role = 'admin' AND status = 'approved'
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

pub async fn count_users(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_users_by_status(pool: &Pool<Postgres>, status: UserStatus) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_admins(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn update_user_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: UserStatus,
) -> Result<Option<DbUser>> {
    tracing::debug!("Updating user status: id={}, status={}", id, status);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET status = $2
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, status, manzana, villa, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_user_role(pool: &Pool<Postgres>, id: Uuid, role: Role) -> Result<Option<DbUser>> {
    tracing::debug!("Updating user role: id={}, role={}", id, role);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET role = $2
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, status, manzana, villa, created_at
        "#,
    )
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_password_hash(
    pool: &Pool<Postgres>,
    id: Uuid,
    password_hash: &str,
) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    household: &Household,
) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = $2, manzana = $3, villa = $4
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, status, manzana, villa, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(&household.manzana)
    .bind(&household.villa)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Overwrites an existing account from an imported sheet. The password is
/// only replaced when the sheet carries one.
pub async fn update_imported_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    user: &NewUser,
    password_hash: Option<&str>,
) -> Result<DbUser> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = $2,
            role = $3,
            status = $4,
            manzana = $5,
            villa = $6,
            password_hash = COALESCE($7, password_hash)
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, status, manzana, villa, created_at
        "#,
    )
    .bind(id)
    .bind(&user.name)
    .bind(user.role.as_str())
    .bind(user.status.as_str())
    .bind(&user.household.manzana)
    .bind(&user.household.villa)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
