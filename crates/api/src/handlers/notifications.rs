use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use courtside_core::{
    errors::CourtError,
    models::notification::{Notification, UnreadCount},
};
use courtside_db::{models::convert_all, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let rows = repositories::notification::list_for_user(&state.db_pool, user.id)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(convert_all(rows)?))
}

#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UnreadCount>, AppError> {
    let unread = repositories::notification::count_unread(&state.db_pool, user.id)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(UnreadCount { unread }))
}

#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let updated = repositories::notification::mark_read(&state.db_pool, user.id, id)
        .await
        .map_err(CourtError::Database)?;
    if !updated {
        return Err(AppError(CourtError::NotFound(format!(
            "Notification with ID {} not found",
            id
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn mark_all_read(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, AppError> {
    repositories::notification::mark_all_read(&state.db_pool, user.id)
        .await
        .map_err(CourtError::Database)?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn clear_notifications(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, AppError> {
    let removed = repositories::notification::clear_for_user(&state.db_pool, user.id)
        .await
        .map_err(CourtError::Database)?;
    tracing::debug!("Cleared {} notifications for {}", removed, user.email);
    Ok(StatusCode::NO_CONTENT)
}
