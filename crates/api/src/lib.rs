//! # Courtside API
//!
//! The API crate provides the web server for the Courtside court booking
//! service. Members register, log in and reserve court time; administrators
//! approve accounts, manage reservations and configure the facility.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Authentication extractors and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Booking policy lives in `courtside-core` and persistence in `courtside-db`;
//! handlers load what the rules need, call into the core, and store the
//! outcome.

/// Administrator bootstrap at startup
pub mod bootstrap;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use courtside_core::clock::{local_now, local_today, Clock, SystemClock};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(db_pool, &config));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Source of the current instant
    pub clock: Arc<dyn Clock>,
    /// Facility timezone
    pub timezone: Tz,
    /// Lifetime of a login session
    pub session_ttl: chrono::Duration,
}

impl ApiState {
    pub fn new(db_pool: PgPool, config: &config::ApiConfig) -> Self {
        Self {
            db_pool,
            clock: Arc::new(SystemClock),
            timezone: config.timezone,
            session_ttl: config.session_ttl(),
        }
    }

    pub fn now(&self) -> DateTime<Tz> {
        local_now(self.clock.as_ref(), self.timezone)
    }

    pub fn today(&self) -> NaiveDate {
        local_today(self.clock.as_ref(), self.timezone)
    }
}

/// Builds the application router with every route and the trace layer.
///
/// CORS and timeouts are added by [`start_server`] since they depend on the
/// deployment configuration.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration, login and profile
        .merge(routes::auth::routes())
        // Public settings, courts and availability
        .merge(routes::settings::routes())
        // Member reservations
        .merge(routes::reservations::routes())
        // Notification inbox
        .merge(routes::notifications::routes())
        // Administration
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Returns
///
/// * `Result<()>` - Success or error result
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = courtside_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Make sure someone can administer the facility
    bootstrap::ensure_admin(&db_pool, config.admin_seed.as_ref()).await?;

    let state = Arc::new(ApiState::new(db_pool, &config));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
