use crate::models::DbSystemChange;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn record_change(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    user_name: &str,
    action: &str,
    details: &str,
) -> Result<DbSystemChange> {
    tracing::debug!("Recording change: user={}, action={}", user_name, action);

    let row = sqlx::query_as::<_, DbSystemChange>(
        r#"
        INSERT INTO system_changes (id, user_id, user_name, action, details, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, user_name, action, details, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(user_name)
    .bind(action)
    .bind(details)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Newest first. `search` matches author, action or details.
pub async fn list_changes(pool: &Pool<Postgres>, search: Option<&str>) -> Result<Vec<DbSystemChange>> {
    let rows = sqlx::query_as::<_, DbSystemChange>(
        r#"
        SELECT id, user_id, user_name, action, details, created_at
        FROM system_changes
        WHERE $1::TEXT IS NULL
           OR user_name ILIKE $1
           OR action ILIKE $1
           OR details ILIKE $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(search.map(super::contains_pattern))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
