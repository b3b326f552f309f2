//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! for everything except the database connection string.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: request timeout (default: 30)
//! - `SESSION_TTL_HOURS`: lifetime of a login session (default: 72)
//! - `FACILITY_TIMEZONE`: IANA timezone of the facility (default: "America/Guayaquil")
//! - `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `ADMIN_NAME`: administrator created at
//!   startup when the database has none

use chrono_tz::Tz;
use courtside_core::clock::DEFAULT_TIMEZONE;
use eyre::{eyre, Result, WrapErr};
use std::env;
use tracing::Level;

const DEFAULT_SESSION_TTL_HOURS: i64 = 72;
const DEFAULT_ADMIN_NAME: &str = "Administrador";

/// Credentials of the administrator seeded into an empty database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Configuration for the Courtside API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use courtside_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Hours a session token stays valid after login
    pub session_ttl_hours: i64,

    /// Timezone used for the booking window and "today"
    pub timezone: Tz,

    /// Administrator to create when none exists
    pub admin_seed: Option<AdminSeed>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, or if `API_PORT`,
    /// `SESSION_TTL_HOURS` or `FACILITY_TIMEZONE` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use courtside_api::config::ApiConfig;
    ///
    /// let vars = HashMap::from([("DATABASE_URL", "postgres://localhost/courtside")]);
    /// let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.port, 3000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Session and facility settings
        let session_ttl_hours = match lookup("SESSION_TTL_HOURS") {
            Some(value) => value.parse().wrap_err("Invalid SESSION_TTL_HOURS value")?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };
        if session_ttl_hours <= 0 {
            return Err(eyre!("SESSION_TTL_HOURS must be positive"));
        }

        let timezone = match lookup("FACILITY_TIMEZONE") {
            Some(value) => value
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid FACILITY_TIMEZONE value: {}", e))?,
            None => DEFAULT_TIMEZONE,
        };

        // Bootstrap administrator
        let admin_seed = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                name: lookup("ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            session_ttl_hours,
            timezone,
            admin_seed,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}
