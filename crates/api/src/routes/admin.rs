use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Users
        .route("/api/admin/users", get(handlers::admin_users::list_users))
        .route(
            "/api/admin/users/pending",
            get(handlers::admin_users::list_pending_users),
        )
        .route(
            "/api/admin/users/export",
            get(handlers::admin_users::export_users),
        )
        .route(
            "/api/admin/users/import",
            post(handlers::admin_users::import_users),
        )
        .route(
            "/api/admin/users/:id/approve",
            post(handlers::admin_users::approve_user),
        )
        .route(
            "/api/admin/users/:id/reject",
            post(handlers::admin_users::reject_user),
        )
        .route(
            "/api/admin/users/:id/block",
            post(handlers::admin_users::block_user),
        )
        .route(
            "/api/admin/users/:id/unblock",
            post(handlers::admin_users::unblock_user),
        )
        .route(
            "/api/admin/users/:id/role",
            post(handlers::admin_users::toggle_role),
        )
        .route(
            "/api/admin/users/:id/password",
            put(handlers::admin_users::reset_password),
        )
        // Reservations
        .route(
            "/api/admin/reservations",
            get(handlers::admin_reservations::list_reservations)
                .post(handlers::admin_reservations::create_for_user),
        )
        .route(
            "/api/admin/reservations/export",
            get(handlers::admin_reservations::export_reservations),
        )
        .route(
            "/api/admin/reservations/:id/status",
            put(handlers::admin_reservations::update_status),
        )
        .route(
            "/api/admin/reservations/:id/payment-proof",
            get(handlers::admin_reservations::download_payment_proof),
        )
        .route(
            "/api/admin/cancellations",
            get(handlers::admin_reservations::list_cancellations),
        )
        // Instructor bookings
        .route(
            "/api/admin/instructor-bookings",
            get(handlers::instructor::list_bookings).post(handlers::instructor::create_booking),
        )
        .route(
            "/api/admin/instructor-bookings/:id",
            delete(handlers::instructor::delete_booking),
        )
        // Settings
        .route("/api/admin/settings", get(handlers::admin_settings::get_settings))
        .route(
            "/api/admin/settings/schedule",
            put(handlers::admin_settings::update_schedule),
        )
        .route(
            "/api/admin/settings/pricing",
            put(handlers::admin_settings::update_pricing),
        )
        .route(
            "/api/admin/settings/branding",
            put(handlers::admin_settings::update_branding),
        )
        .route(
            "/api/admin/settings/rules",
            put(handlers::admin_settings::update_rules),
        )
        .route(
            "/api/admin/settings/integrations",
            put(handlers::admin_settings::update_integrations),
        )
        // Audit log and statistics
        .route("/api/admin/changes", get(handlers::audit::list_changes))
        .route("/api/admin/stats", get(handlers::stats::get_report))
        .route("/api/admin/dashboard", get(handlers::stats::get_dashboard))
}
