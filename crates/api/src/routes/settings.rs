use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/settings", get(handlers::settings::get_public_settings))
        .route("/api/courts", get(handlers::settings::list_courts))
        .route("/api/availability", get(handlers::settings::get_availability))
}
