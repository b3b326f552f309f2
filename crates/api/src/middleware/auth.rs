//! # Authentication Module
//!
//! Password hashing, session tokens and the extractors that turn a bearer
//! token into the calling user.
//!
//! Passwords are hashed with Argon2 and stored as PHC strings. Sessions are
//! opaque random tokens kept in the `sessions` table; clients send them as
//! `Authorization: Bearer <token>`.
//!
//! Handlers declare what they need through their arguments:
//!
//! ```ignore
//! async fn my_reservations(user: AuthUser) -> ... { }   // any approved user
//! async fn list_users(admin: AdminUser) -> ... { }      // administrators only
//! ```

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use courtside_core::{errors::CourtError, models::user::User};
use eyre::Result;
use rand::{distributions::Alphanumeric, Rng};

use crate::{middleware::error_handling::AppError, ApiState};

/// Length of a session token in characters
pub const SESSION_TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// # Arguments
///
/// * `password` - The plain text password to hash
///
/// # Returns
///
/// * `Result<String>` - The hash in PHC string format
///
/// # Example
///
/// ```
/// use courtside_api::middleware::auth::hash_password;
///
/// let hashed = hash_password("secret123").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks a password against a stored PHC hash. A malformed hash never verifies.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Generates a random alphanumeric session token
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// An approved user holding a valid session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// An approved administrator holding a valid session.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Resolves the session token of the request to its user.
async fn session_user(parts: &Parts, state: &ApiState) -> Result<User, AppError> {
    let token = bearer_token(&parts.headers)
        .ok_or_else(|| CourtError::Authentication("Missing bearer token".to_string()))?;

    let row = courtside_db::repositories::session::get_session_user(
        &state.db_pool,
        token,
        state.clock.now(),
    )
    .await
    .map_err(CourtError::Database)?
    .ok_or_else(|| CourtError::Authentication("Session is invalid or has expired".to_string()))?;

    let user = User::try_from(row).map_err(CourtError::Database)?;
    user.ensure_can_login()?;
    Ok(user)
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        session_user(parts, state).await.map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let user = session_user(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError(CourtError::Authorization(
                "Administrator access required".to_string(),
            )));
        }
        Ok(AdminUser(user))
    }
}
