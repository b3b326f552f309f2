use axum::{extract::State, Json};
use courtside_core::{
    errors::CourtError,
    models::{
        reservation::Reservation,
        stats::{Dashboard, StatsReport},
        user::UserStatus,
    },
    stats,
};
use courtside_db::{models::convert_all, repositories};
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

async fn all_reservations(state: &ApiState) -> Result<Vec<Reservation>, AppError> {
    let rows = repositories::reservation::list_all_reservations(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    Ok(convert_all(rows)?)
}

#[axum::debug_handler]
pub async fn get_report(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<StatsReport>, AppError> {
    let reservations = all_reservations(&state).await?;
    Ok(Json(stats::report(&reservations, state.today())))
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Dashboard>, AppError> {
    let total_users = repositories::user::count_users(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    let pending_users = repositories::user::count_users_by_status(&state.db_pool, UserStatus::Pending)
        .await
        .map_err(CourtError::Database)?;
    let reservations = all_reservations(&state).await?;

    Ok(Json(stats::dashboard(
        total_users,
        pending_users,
        &reservations,
        state.today(),
    )))
}
