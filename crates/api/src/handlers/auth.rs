use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use courtside_core::{
    errors::CourtError,
    models::{
        notification::{NewNotification, NotificationKind},
        user::{
            ChangePasswordRequest, LoginRequest, LoginResponse, PasswordRecoveryRequest,
            PasswordRecoveryResponse, RegisterRequest, UpdateProfileRequest, User, UserProfile,
        },
    },
    validation::{normalize_email, validate_password},
};
use courtside_db::repositories;
use std::sync::Arc;

use crate::{
    handlers::support,
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let new_user = payload.validate()?;

    let existing = repositories::user::get_user_by_email(&state.db_pool, &new_user.email)
        .await
        .map_err(CourtError::Database)?;
    if existing.is_some() {
        return Err(AppError(CourtError::Conflict(
            "An account with this email already exists".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&new_user.password)?;
    let row = repositories::user::create_user(&state.db_pool, &new_user, &password_hash)
        .await
        .map_err(CourtError::Database)?;
    let user = User::try_from(row)?;

    support::notify_admins(
        &state,
        NewNotification::new(
            NotificationKind::Info,
            "Nuevo registro",
            format!(
                "{} (Mz {} Villa {}) solicita acceso",
                user.name, user.household.manzana, user.household.villa
            ),
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(user.profile())))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;
    let invalid = || CourtError::Authentication("Invalid email or password".to_string());

    let row = repositories::user::get_user_by_email(&state.db_pool, &normalize_email(&payload.email))
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(invalid)?;
    let user = User::try_from(row)?;

    if !auth::verify_password(&user.password_hash, &payload.password) {
        return Err(AppError(invalid()));
    }
    user.ensure_can_login()?;

    let now = state.clock.now();
    let expires_at = now + state.session_ttl;
    let token = auth::generate_session_token();
    repositories::session::create_session(&state.db_pool, &token, user.id, expires_at)
        .await
        .map_err(CourtError::Database)?;

    if let Err(e) = repositories::session::delete_expired_sessions(&state.db_pool, now).await {
        tracing::warn!("Could not prune expired sessions: {:?}", e);
    }

    tracing::info!("User {} logged in", user.email);
    Ok(Json(LoginResponse {
        token,
        expires_at,
        user: user.profile(),
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = auth::bearer_token(&headers) {
        repositories::session::delete_session(&state.db_pool, token)
            .await
            .map_err(CourtError::Database)?;
    }
    tracing::info!("User {} logged out", user.email);
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(user.profile())
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let (name, household) = payload.validate()?;

    let row = repositories::user::update_profile(&state.db_pool, user.id, &name, &household)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("User with ID {} not found", user.id)))?;

    Ok(Json(User::try_from(row)?.profile()))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<Arc<ApiState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    if !auth::verify_password(&user.password_hash, &payload.current_password) {
        return Err(AppError(CourtError::Authentication(
            "Current password is incorrect".to_string(),
        )));
    }
    validate_password(&payload.new_password)?;

    let password_hash = auth::hash_password(&payload.new_password)?;
    repositories::user::update_password_hash(&state.db_pool, user.id, &password_hash)
        .await
        .map_err(CourtError::Database)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Forwards a forgotten-password request to the administrators, who reset
/// the password by hand.
#[axum::debug_handler]
pub async fn password_recovery(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<PasswordRecoveryRequest>,
) -> Result<Json<PasswordRecoveryResponse>, AppError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() {
        return Err(AppError(CourtError::Validation("email is required".to_string())));
    }

    let row = repositories::user::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound("No account is registered with that email".to_string()))?;
    let user = User::try_from(row)?;

    support::notify_admins(
        &state,
        NewNotification::new(
            NotificationKind::Warning,
            "Recuperación de contraseña",
            format!("{} ({}) solicita restablecer su contraseña", user.name, user.email),
        ),
    )
    .await;

    let settings = support::load_settings(&state).await?;
    Ok(Json(PasswordRecoveryResponse {
        message: "An administrator has been notified and will contact you".to_string(),
        contact_phone: settings.branding.contact_phone,
    }))
}
