use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use courtside_core::{
    errors::CourtError,
    models::instructor::{CreateInstructorBookingRequest, InstructorBooking, InstructorBookingQuery},
    rules::check_instructor_limit,
    slots::find_conflict,
};
use courtside_db::{models::convert_all, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::support,
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<InstructorBookingQuery>,
) -> Result<Json<Vec<InstructorBooking>>, AppError> {
    let rows = repositories::instructor::list_instructor_bookings(&state.db_pool, query.date)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(convert_all(rows)?))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateInstructorBookingRequest>,
) -> Result<(StatusCode, Json<InstructorBooking>), AppError> {
    let booking = payload.validate(admin.id)?;

    let same_day: Vec<InstructorBooking> = convert_all(
        repositories::instructor::list_instructor_bookings(&state.db_pool, Some(booking.date))
            .await
            .map_err(CourtError::Database)?,
    )?;
    let booked_minutes: u32 = same_day
        .iter()
        .filter(|b| b.court == booking.court)
        .map(|b| u32::from(b.duration_minutes()))
        .sum();
    check_instructor_limit(booking.court, booked_minutes, payload.duration_minutes)?;

    let occupied = support::occupancy_on(&state, booking.date).await?;
    if find_conflict(&occupied, booking.court, booking.date, booking.start, booking.end).is_some() {
        return Err(AppError(CourtError::Conflict(
            "The selected time is already taken".to_string(),
        )));
    }

    let row = repositories::instructor::create_instructor_booking(&state.db_pool, &booking)
        .await
        .map_err(CourtError::Database)?;
    let created = InstructorBooking::try_from(row)?;

    support::record_change(
        &state,
        &admin,
        "Reserva de instructor creada",
        format!(
            "{}: {} {} {}",
            created.instructor_name,
            created.court.display_name(),
            created.date,
            created.slot_label()
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let row = repositories::instructor::get_instructor_booking(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| {
            CourtError::NotFound(format!("Instructor booking with ID {} not found", id))
        })?;
    let booking = InstructorBooking::try_from(row)?;

    repositories::instructor::delete_instructor_booking(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?;

    support::record_change(
        &state,
        &admin,
        "Reserva de instructor eliminada",
        format!(
            "{}: {} {} {}",
            booking.instructor_name,
            booking.court.display_name(),
            booking.date,
            booking.slot_label()
        ),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
