use axum::{
    extract::{Query, State},
    Json,
};
use courtside_core::{
    errors::CourtError,
    models::audit::{ChangeQuery, SystemChange},
};
use courtside_db::repositories;
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_changes(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<ChangeQuery>,
) -> Result<Json<Vec<SystemChange>>, AppError> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let rows = repositories::audit::list_changes(&state.db_pool, search)
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(rows.into_iter().map(SystemChange::from).collect()))
}
