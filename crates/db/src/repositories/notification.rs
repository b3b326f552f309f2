use crate::models::DbNotification;
use chrono::Utc;
use courtside_core::models::notification::NewNotification;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    notification: &NewNotification,
) -> Result<DbNotification> {
    let row = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, user_id, title, message, kind, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6)
        RETURNING id, user_id, title, message, kind, is_read, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&notification.title)
    .bind(&notification.message)
    .bind(notification.kind.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Sends the same notification to every user in `user_ids`.
pub async fn create_for_users(
    pool: &Pool<Postgres>,
    user_ids: &[Uuid],
    notification: &NewNotification,
) -> Result<u64> {
    tracing::debug!(
        "Broadcasting notification '{}' to {} users",
        notification.title,
        user_ids.len()
    );

    let mut tx = pool.begin().await?;
    let now = Utc::now();
    for user_id in user_ids {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, message, kind, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(user_ids.len() as u64)
}

pub async fn list_for_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbNotification>> {
    let rows = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, title, message, kind, is_read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_unread(pool: &Pool<Postgres>, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Only touches notifications owned by `user_id`.
pub async fn mark_read(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &Pool<Postgres>, user_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn clear_for_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
