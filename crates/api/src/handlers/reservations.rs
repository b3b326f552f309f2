use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use courtside_core::{
    errors::CourtError,
    models::{
        notification::{NewNotification, NotificationKind},
        reservation::{
            CancelReservationRequest, Cancellation, CreateReservationRequest, NewReservation,
            PaymentProof, PaymentProofUpload, Reservation, ReservationStatus,
        },
    },
    rules::{evaluate, BookingContext, BookingRequest},
};
use courtside_db::{models::convert_all, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::support,
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Decodes an uploaded proof of payment, accepting images and PDFs only.
pub fn decode_payment_proof(upload: &PaymentProofUpload) -> Result<PaymentProof, CourtError> {
    let content_type = PaymentProof::accepted_content_type(&upload.content_type, &upload.file_name)
        .ok_or_else(|| {
            CourtError::Validation("Proof of payment must be an image or a PDF document".to_string())
        })?;

    let data = STANDARD
        .decode(upload.data_base64.trim())
        .map_err(|e| CourtError::Validation(format!("Proof of payment is not valid base64: {}", e)))?;
    if data.is_empty() {
        return Err(CourtError::Validation("Proof of payment is empty".to_string()));
    }

    Ok(PaymentProof {
        file_name: upload.file_name.trim().to_string(),
        content_type: content_type.to_string(),
        data,
    })
}

#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let payment_proof = payload
        .payment_proof
        .as_ref()
        .map(decode_payment_proof)
        .transpose()?;

    let settings = support::load_settings(&state).await?;
    let own: Vec<Reservation> = convert_all(
        repositories::reservation::list_reservations_by_user(&state.db_pool, user.id)
            .await
            .map_err(CourtError::Database)?,
    )?;
    let household: Vec<Reservation> = convert_all(
        repositories::reservation::list_household_reservations(
            &state.db_pool,
            &user.household,
            user.id,
            payload.date,
        )
        .await
        .map_err(CourtError::Database)?,
    )?;
    let occupied = support::occupancy_on(&state, payload.date).await?;

    let ctx = BookingContext {
        now: state.now(),
        schedule: &settings.schedule,
        is_admin: user.is_admin(),
        own_reservations: &own,
        household_reservations: &household,
        occupied: &occupied,
    };
    let request = BookingRequest {
        court: payload.court,
        date: payload.date,
        start: payload.start,
        end: payload.end,
        has_payment_proof: payment_proof.is_some(),
    };
    let decision = evaluate(&ctx, &request)?;

    let row = repositories::reservation::create_reservation(
        &state.db_pool,
        &NewReservation {
            user_id: user.id,
            court: payload.court,
            date: payload.date,
            start: decision.start,
            end: decision.end,
            status: decision.status,
            created_by_admin: false,
            payment_proof,
        },
    )
    .await
    .map_err(CourtError::Database)?;
    let reservation = Reservation::try_from(row)?;

    tracing::info!(
        "Reservation {} created by {}: {} {} {} ({})",
        reservation.id,
        user.email,
        reservation.court,
        reservation.date,
        reservation.slot_label(),
        reservation.status
    );

    let notification = match reservation.status {
        ReservationStatus::Pending => NewNotification::new(
            NotificationKind::Warning,
            "Pago por verificar",
            format!(
                "{} reservó {} el {} ({}) y adjuntó comprobante de pago",
                user.name,
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label()
            ),
        ),
        _ => NewNotification::new(
            NotificationKind::Info,
            "Nueva reserva",
            format!(
                "{} reservó {} el {} ({})",
                user.name,
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label()
            ),
        ),
    };
    support::notify_admins(&state, notification).await;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[axum::debug_handler]
pub async fn my_reservations(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let rows = repositories::reservation::list_reservations_by_user(&state.db_pool, user.id)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(convert_all(rows)?))
}

#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelReservationRequest>,
) -> Result<Json<Cancellation>, AppError> {
    let justification = payload.validate()?;

    let reservation = support::find_reservation(&state, id).await?;
    if reservation.user_id != user.id {
        return Err(AppError(CourtError::NotFound(format!(
            "Reservation with ID {} not found",
            id
        ))));
    }
    if !reservation.status.is_active() {
        return Err(AppError(CourtError::Conflict(format!(
            "Reservation is already {}",
            reservation.status
        ))));
    }

    let row = repositories::cancellation::cancel_reservation(
        &state.db_pool,
        &reservation,
        &user.name,
        &justification,
    )
    .await
    .map_err(CourtError::Database)?;
    let cancellation = Cancellation::try_from(row)?;

    support::notify_admins(
        &state,
        NewNotification::new(
            NotificationKind::Warning,
            "Reserva anulada",
            format!(
                "{} anuló su reserva de {} el {} ({}): {}",
                user.name,
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label(),
                justification
            ),
        ),
    )
    .await;
    support::notify_user(
        &state,
        user.id,
        NewNotification::new(
            NotificationKind::Info,
            "Reserva anulada",
            format!(
                "Tu reserva de {} el {} ({}) fue anulada",
                reservation.court.display_name(),
                reservation.date,
                reservation.slot_label()
            ),
        ),
    )
    .await;

    Ok(Json(cancellation))
}
