use crate::models::DbCancellation;
use chrono::Utc;
use courtside_core::models::reservation::Reservation;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Marks the reservation cancelled and stores the justification in one transaction.
pub async fn cancel_reservation(
    pool: &Pool<Postgres>,
    reservation: &Reservation,
    user_name: &str,
    justification: &str,
) -> Result<DbCancellation> {
    tracing::debug!("Cancelling reservation: id={}", reservation.id);

    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE reservations SET status = 'cancelled' WHERE id = $1")
        .bind(reservation.id)
        .execute(&mut *tx)
        .await?;

    let cancellation = sqlx::query_as::<_, DbCancellation>(
        r#"
        INSERT INTO cancellations (
            id, reservation_id, user_id, user_name, court, reservation_date,
            slot_label, justification, cancelled_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, reservation_id, user_id, user_name, court, reservation_date,
                  slot_label, justification, cancelled_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(reservation.id)
    .bind(reservation.user_id)
    .bind(user_name)
    .bind(reservation.court.as_str())
    .bind(reservation.date)
    .bind(reservation.slot_label())
    .bind(justification)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(cancellation)
}

pub async fn list_cancellations(pool: &Pool<Postgres>) -> Result<Vec<DbCancellation>> {
    let rows = sqlx::query_as::<_, DbCancellation>(
        r#"
        SELECT id, reservation_id, user_id, user_name, court, reservation_date,
               slot_label, justification, cancelled_at
        FROM cancellations
        ORDER BY cancelled_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
