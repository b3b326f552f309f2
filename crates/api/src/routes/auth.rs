use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/password-recovery",
            post(handlers::auth::password_recovery),
        )
        .route(
            "/api/auth/me",
            get(handlers::auth::me).put(handlers::auth::update_profile),
        )
        .route("/api/auth/password", put(handlers::auth::change_password))
}
