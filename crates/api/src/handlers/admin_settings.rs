use axum::{extract::State, Json};
use courtside_core::{
    errors::{CourtError, CourtResult},
    models::settings::{
        AdminSettings, Branding, IntegrationSettings, NightPricing, ScheduleSettings, Settings,
        UpdateRulesRequest,
    },
};
use courtside_db::repositories;
use std::sync::Arc;

use crate::{
    handlers::support,
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

/// Loads the settings, applies one section change, saves and audits it.
///
/// `apply` validates the change and returns the audit details.
async fn update_section<F>(
    state: &ApiState,
    admin: &AdminUser,
    action: &str,
    apply: F,
) -> Result<Json<AdminSettings>, AppError>
where
    F: FnOnce(&mut Settings) -> CourtResult<String>,
{
    let mut settings = support::load_settings(state).await?;
    let details = apply(&mut settings)?;

    repositories::settings::save_settings(&state.db_pool, &settings)
        .await
        .map_err(CourtError::Database)?;
    support::record_change(state, &admin.0, action, details).await;

    Ok(Json(settings.admin_view()))
}

#[axum::debug_handler]
pub async fn get_settings(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<AdminSettings>, AppError> {
    let settings = support::load_settings(&state).await?;
    Ok(Json(settings.admin_view()))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Json(payload): Json<ScheduleSettings>,
) -> Result<Json<AdminSettings>, AppError> {
    update_section(&state, &admin, "Horario actualizado", |settings| {
        payload.validate()?;
        let details = format!(
            "{}-{}, turnos de {} min, {} reserva(s) por día, nocturno desde {}",
            payload.open,
            payload.close,
            payload.slot_duration_minutes,
            payload.max_reservations_per_day,
            payload.night_start
        );
        settings.schedule = payload;
        Ok(details)
    })
    .await
}

#[axum::debug_handler]
pub async fn update_pricing(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Json(payload): Json<NightPricing>,
) -> Result<Json<AdminSettings>, AppError> {
    update_section(&state, &admin, "Precios nocturnos actualizados", |settings| {
        payload.validate()?;
        let details = format!(
            "tenis {}, fútbol {}, básquet {}, vóley {} (centavos)",
            payload.tennis_cents,
            payload.football_cents,
            payload.basketball_cents,
            payload.volleyball_cents
        );
        settings.pricing = payload;
        Ok(details)
    })
    .await
}

#[axum::debug_handler]
pub async fn update_branding(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Json(payload): Json<Branding>,
) -> Result<Json<AdminSettings>, AppError> {
    update_section(&state, &admin, "Personalización actualizada", |settings| {
        payload.validate()?;
        let details = format!("{} <{}>", payload.app_name, payload.contact_email);
        settings.branding = payload;
        Ok(details)
    })
    .await
}

#[axum::debug_handler]
pub async fn update_rules(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Json(payload): Json<UpdateRulesRequest>,
) -> Result<Json<AdminSettings>, AppError> {
    update_section(&state, &admin, "Reglamento actualizado", |settings| {
        settings.rules_text = payload.validate()?;
        Ok(format!("{} caracteres", settings.rules_text.chars().count()))
    })
    .await
}

/// An omitted `api_key` keeps the stored key; an empty one removes it.
#[axum::debug_handler]
pub async fn update_integrations(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Json(payload): Json<IntegrationSettings>,
) -> Result<Json<AdminSettings>, AppError> {
    update_section(&state, &admin, "Integraciones actualizadas", |settings| {
        let api_key = match payload.api_key.as_deref().map(str::trim) {
            None => settings.integrations.api_key.clone(),
            Some("") => None,
            Some(key) => Some(key.to_string()),
        };
        let integrations = IntegrationSettings {
            api_key,
            enabled: payload.enabled,
        };
        integrations.validate()?;

        let details = format!(
            "asistente {}",
            if integrations.enabled { "activado" } else { "desactivado" }
        );
        settings.integrations = integrations;
        Ok(details)
    })
    .await
}
