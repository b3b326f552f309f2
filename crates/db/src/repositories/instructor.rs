use crate::models::DbInstructorBooking;
use chrono::{NaiveDate, Utc};
use courtside_core::models::instructor::NewInstructorBooking;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_instructor_booking(
    pool: &Pool<Postgres>,
    booking: &NewInstructorBooking,
) -> Result<DbInstructorBooking> {
    let id = Uuid::new_v4();
    tracing::debug!(
        "Creating instructor booking: id={}, instructor={}, court={}, date={}",
        id,
        booking.instructor_name,
        booking.court,
        booking.date
    );

    let row = sqlx::query_as::<_, DbInstructorBooking>(
        r#"
        INSERT INTO instructor_bookings (
            id, instructor_name, court, booking_date, start_minute, end_minute, created_by, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, instructor_name, court, booking_date, start_minute, end_minute, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(&booking.instructor_name)
    .bind(booking.court.as_str())
    .bind(booking.date)
    .bind(i32::from(booking.start.minutes()))
    .bind(i32::from(booking.end.minutes()))
    .bind(booking.created_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_instructor_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbInstructorBooking>> {
    let row = sqlx::query_as::<_, DbInstructorBooking>(
        r#"
        SELECT id, instructor_name, court, booking_date, start_minute, end_minute, created_by, created_at
        FROM instructor_bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// All bookings, or only those on `date` when given.
pub async fn list_instructor_bookings(
    pool: &Pool<Postgres>,
    date: Option<NaiveDate>,
) -> Result<Vec<DbInstructorBooking>> {
    let rows = sqlx::query_as::<_, DbInstructorBooking>(
        r#"
        SELECT id, instructor_name, court, booking_date, start_minute, end_minute, created_by, created_at
        FROM instructor_bookings
        WHERE $1::DATE IS NULL OR booking_date = $1
        ORDER BY booking_date DESC, start_minute ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn delete_instructor_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting instructor booking: id={}", id);

    let result = sqlx::query("DELETE FROM instructor_bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
