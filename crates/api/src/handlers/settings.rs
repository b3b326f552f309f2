use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use courtside_core::{
    courts::{Court, CourtInfo},
    models::settings::PublicSettings,
    slots::{availability, SlotAvailability},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{handlers::support, middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub court: Court,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub court: CourtInfo,
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
}

/// Facility settings visible to everyone, integrations excluded.
#[axum::debug_handler]
pub async fn get_public_settings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<PublicSettings>, AppError> {
    let settings = support::load_settings(&state).await?;
    Ok(Json(settings.public_view()))
}

pub async fn list_courts() -> Json<Vec<CourtInfo>> {
    Json(Court::ALL.iter().map(Court::info).collect())
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let settings = support::load_settings(&state).await?;
    let occupied = support::occupancy_on(&state, query.date).await?;

    let slots = availability(
        &settings.schedule.grid(),
        &occupied,
        query.court,
        query.date,
        settings.pricing.price_for(query.court),
    );

    Ok(Json(AvailabilityResponse {
        court: query.court.info(),
        date: query.date,
        slots,
    }))
}
