use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use courtside_core::{
    errors::CourtError,
    export::reservations_to_csv,
    models::{
        notification::{NewNotification, NotificationKind},
        reservation::{
            AdminReservationRequest, Cancellation, NewReservation, Reservation,
            ReservationDetail, ReservationFilter, ReservationStatus,
            UpdateReservationStatusRequest,
        },
        user::UserStatus,
    },
    rules::admin_booking_range,
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

async fn filtered_details(
    state: &ApiState,
    filter: &ReservationFilter,
) -> Result<Vec<ReservationDetail>, AppError> {
    let rows = repositories::reservation::list_reservation_details(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    Ok(filter.apply(convert_all(rows)?))
}

#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<Vec<ReservationDetail>>, AppError> {
    Ok(Json(filtered_details(&state, &filter).await?))
}

#[axum::debug_handler]
pub async fn export_reservations(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ReservationFilter>,
) -> Result<Response, AppError> {
    let details = filtered_details(&state, &filter).await?;
    let csv = reservations_to_csv(&details)?;

    Ok(support::attachment(
        "text/csv; charset=utf-8",
        &format!("reservas_{}.csv", state.today()),
        csv.into_bytes(),
    ))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationStatusRequest>,
) -> Result<Json<Reservation>, AppError> {
    let status = payload.validate()?;
    let current = support::find_reservation(&state, id).await?;
    if current.status == ReservationStatus::Cancelled {
        return Err(AppError(CourtError::Conflict(
            "Cancelled reservations cannot be changed".to_string(),
        )));
    }

    // Reactivating a rejected booking must not double-book the court
    if !current.status.is_active() && status.is_active() {
        let occupied = support::occupancy_on(&state, current.date).await?;
        if find_conflict(&occupied, current.court, current.date, current.start, current.end)
            .is_some()
        {
            return Err(AppError(CourtError::Conflict(
                "The time slot has been taken by another booking".to_string(),
            )));
        }
    }

    let row = repositories::reservation::update_reservation_status(&state.db_pool, id, status)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("Reservation with ID {} not found", id)))?;
    let reservation = Reservation::try_from(row)?;

    let (kind, title) = match status {
        ReservationStatus::Confirmed => (NotificationKind::Success, "Reserva confirmada"),
        ReservationStatus::Rejected => (NotificationKind::Error, "Reserva rechazada"),
        _ => (NotificationKind::Info, "Reserva actualizada"),
    };
    support::notify_user(
        &state,
        reservation.user_id,
        NewNotification::new(
            kind,
            title,
            format!(
                "Tu reserva de {} el {} ({}) está: {}",
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label(),
                status.display_name()
            ),
        ),
    )
    .await;
    support::record_change(
        &state,
        &admin,
        "Estado de reserva",
        format!("{}: {} -> {}", reservation.id, current.status, status),
    )
    .await;

    Ok(Json(reservation))
}

/// Books on behalf of a member. Member rules are skipped; the court must
/// still be free.
#[axum::debug_handler]
pub async fn create_for_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<AdminReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let user = support::find_user(&state, payload.user_id).await?;
    if user.status != UserStatus::Approved {
        return Err(AppError(CourtError::Validation(format!(
            "User {} is not approved",
            user.email
        ))));
    }

    let settings = support::load_settings(&state).await?;
    let (start, end) = admin_booking_range(
        &settings.schedule,
        payload.court,
        payload.start,
        payload.duration_minutes,
    )?;

    let occupied = support::occupancy_on(&state, payload.date).await?;
    if find_conflict(&occupied, payload.court, payload.date, start, end).is_some() {
        return Err(AppError(CourtError::Conflict(
            "The selected time is already taken".to_string(),
        )));
    }

    let row = repositories::reservation::create_reservation(
        &state.db_pool,
        &NewReservation {
            user_id: user.id,
            court: payload.court,
            date: payload.date,
            start,
            end,
            status: ReservationStatus::Confirmed,
            created_by_admin: true,
            payment_proof: None,
        },
    )
    .await
    .map_err(CourtError::Database)?;
    let reservation = Reservation::try_from(row)?;

    support::notify_user(
        &state,
        user.id,
        NewNotification::new(
            NotificationKind::Success,
            "Nueva reserva",
            format!(
                "La administración reservó {} para ti el {} ({})",
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label()
            ),
        ),
    )
    .await;
    support::record_change(
        &state,
        &admin,
        "Reserva creada por administrador",
        format!(
            "{} {} {} para {}",
            reservation.court.display_name(),
            reservation.date,
            reservation.slot_label(),
            user.email
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[axum::debug_handler]
pub async fn download_payment_proof(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let proof = repositories::reservation::get_payment_proof(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| {
            CourtError::NotFound(format!("Reservation {} has no proof of payment", id))
        })?;

    Ok(support::attachment(&proof.content_type, &proof.file_name, proof.data))
}

#[axum::debug_handler]
pub async fn list_cancellations(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<Cancellation>>, AppError> {
    let rows = repositories::cancellation::list_cancellations(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(convert_all(rows)?))
}
