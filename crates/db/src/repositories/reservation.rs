use crate::models::{DbPaymentProof, DbReservation, DbReservationDetail};
use chrono::{NaiveDate, Utc};
use courtside_core::models::reservation::{NewReservation, ReservationStatus};
use courtside_core::models::user::Household;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_reservation(
    pool: &Pool<Postgres>,
    reservation: &NewReservation,
) -> Result<DbReservation> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let proof = reservation.payment_proof.as_ref();

    tracing::debug!(
        "Creating reservation: id={}, user_id={}, court={}, date={}, {}-{}, status={}",
        id,
        reservation.user_id,
        reservation.court,
        reservation.date,
        reservation.start,
        reservation.end,
        reservation.status
    );

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations (
            id, user_id, court, reservation_date, start_minute, end_minute, status,
            created_by_admin, proof_file_name, proof_content_type, proof_data, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, user_id, court, reservation_date, start_minute, end_minute, status,
                  created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        "#,
    )
    .bind(id)
    .bind(reservation.user_id)
    .bind(reservation.court.as_str())
    .bind(reservation.date)
    .bind(i32::from(reservation.start.minutes()))
    .bind(i32::from(reservation.end.minutes()))
    .bind(reservation.status.as_str())
    .bind(reservation.created_by_admin)
    .bind(proof.map(|p| p.file_name.as_str()))
    .bind(proof.map(|p| p.content_type.as_str()))
    .bind(proof.map(|p| p.data.as_slice()))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_reservation_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbReservation>> {
    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, user_id, court, reservation_date, start_minute, end_minute, status,
               created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_reservations_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbReservation>> {
    let rows = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, user_id, court, reservation_date, start_minute, end_minute, status,
               created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        FROM reservations
        WHERE user_id = $1
        ORDER BY reservation_date DESC, start_minute DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Pending and confirmed reservations on `date`, across all courts.
pub async fn list_active_on_date(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<DbReservation>> {
    let rows = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, user_id, court, reservation_date, start_minute, end_minute, status,
               created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        FROM reservations
        WHERE reservation_date = $1 AND status IN ('pending', 'confirmed')
        ORDER BY start_minute ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Reservations on `date` held by other residents of the same household.
pub async fn list_household_reservations(
    pool: &Pool<Postgres>,
    household: &Household,
    exclude_user: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbReservation>> {
    let rows = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT r.id, r.user_id, r.court, r.reservation_date, r.start_minute, r.end_minute, r.status,
               r.created_by_admin, r.proof_data IS NOT NULL AS has_payment_proof, r.created_at
        FROM reservations r
        JOIN users u ON u.id = r.user_id
        WHERE r.reservation_date = $1
          AND u.id <> $2
          AND LOWER(TRIM(u.manzana)) = LOWER(TRIM($3))
          AND LOWER(TRIM(u.villa)) = LOWER(TRIM($4))
        "#,
    )
    .bind(date)
    .bind(exclude_user)
    .bind(&household.manzana)
    .bind(&household.villa)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_reservation_details(pool: &Pool<Postgres>) -> Result<Vec<DbReservationDetail>> {
    let rows = sqlx::query_as::<_, DbReservationDetail>(
        r#"
        SELECT r.id, r.user_id, r.court, r.reservation_date, r.start_minute, r.end_minute, r.status,
               r.created_by_admin, r.proof_data IS NOT NULL AS has_payment_proof, r.created_at,
               u.name AS user_name, u.email AS user_email, u.manzana, u.villa
        FROM reservations r
        JOIN users u ON u.id = r.user_id
        ORDER BY r.reservation_date DESC, r.start_minute DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_all_reservations(pool: &Pool<Postgres>) -> Result<Vec<DbReservation>> {
    let rows = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, user_id, court, reservation_date, start_minute, end_minute, status,
               created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        FROM reservations
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_reservation_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: ReservationStatus,
) -> Result<Option<DbReservation>> {
    tracing::debug!("Updating reservation status: id={}, status={}", id, status);

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET status = $2
        WHERE id = $1
        RETURNING id, user_id, court, reservation_date, start_minute, end_minute, status,
                  created_by_admin, proof_data IS NOT NULL AS has_payment_proof, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_payment_proof(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPaymentProof>> {
    let proof = sqlx::query_as::<_, DbPaymentProof>(
        r#"
        SELECT proof_file_name AS file_name, proof_content_type AS content_type, proof_data AS data
        FROM reservations
        WHERE id = $1 AND proof_data IS NOT NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(proof)
}
