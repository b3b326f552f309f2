//! Helpers shared by several handlers: loading settings and users, sending
//! notifications and writing the audit log.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use courtside_core::{
    errors::CourtError,
    models::{
        instructor::InstructorBooking,
        notification::NewNotification,
        reservation::Reservation,
        settings::Settings,
        user::User,
    },
    slots::Occupancy,
};
use courtside_db::{models::convert_all, repositories};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn load_settings(state: &ApiState) -> Result<Settings, AppError> {
    let settings = repositories::settings::load_settings(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    Ok(settings)
}

pub async fn find_user(state: &ApiState, id: Uuid) -> Result<User, AppError> {
    let row = repositories::user::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("User with ID {} not found", id)))?;
    Ok(User::try_from(row)?)
}

pub async fn find_reservation(state: &ApiState, id: Uuid) -> Result<Reservation, AppError> {
    let row = repositories::reservation::get_reservation_by_id(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("Reservation with ID {} not found", id)))?;
    Ok(Reservation::try_from(row)?)
}

/// Court time held on `date` by active reservations and instructor bookings.
pub async fn occupancy_on(state: &ApiState, date: NaiveDate) -> Result<Vec<Occupancy>, AppError> {
    let reservations: Vec<Reservation> = convert_all(
        repositories::reservation::list_active_on_date(&state.db_pool, date)
            .await
            .map_err(CourtError::Database)?,
    )?;
    let lessons: Vec<InstructorBooking> = convert_all(
        repositories::instructor::list_instructor_bookings(&state.db_pool, Some(date))
            .await
            .map_err(CourtError::Database)?,
    )?;

    Ok(reservations
        .iter()
        .filter_map(Reservation::occupancy)
        .chain(lessons.iter().map(InstructorBooking::occupancy))
        .collect())
}

/// Sends a notification to every approved administrator.
///
/// Delivery failures are logged and swallowed: the operation that triggered
/// the notification has already succeeded.
pub async fn notify_admins(state: &ApiState, notification: NewNotification) {
    let result: eyre::Result<u64> = async {
        let admins = repositories::user::list_admin_ids(&state.db_pool).await?;
        repositories::notification::create_for_users(&state.db_pool, &admins, &notification).await
    }
    .await;

    if let Err(e) = result {
        tracing::warn!("Could not notify administrators: {:?}", e);
    }
}

/// Sends a notification to one user, logging failures.
pub async fn notify_user(state: &ApiState, user_id: Uuid, notification: NewNotification) {
    if let Err(e) =
        repositories::notification::create_notification(&state.db_pool, user_id, &notification)
            .await
    {
        tracing::warn!("Could not notify user {}: {:?}", user_id, e);
    }
}

/// Appends an entry to the audit log on behalf of `actor`.
pub async fn record_change(state: &ApiState, actor: &User, action: &str, details: String) {
    tracing::info!("{} ({}): {}", action, actor.email, details);

    if let Err(e) =
        repositories::audit::record_change(&state.db_pool, actor.id, &actor.name, action, &details)
            .await
    {
        tracing::warn!("Could not record change '{}': {:?}", action, e);
    }
}

/// Response carrying a downloadable file.
pub fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> Response {
    let file_name: String = file_name
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
