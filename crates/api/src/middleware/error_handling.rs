//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`, so every endpoint fails the same way.
//!
//! | Error                         | Status |
//! |-------------------------------|--------|
//! | `CourtError::NotFound`        | 404    |
//! | `CourtError::Validation`      | 400    |
//! | `CourtError::Authentication`  | 401    |
//! | `CourtError::Authorization`   | 403    |
//! | `CourtError::Conflict`        | 409    |
//! | `CourtError::RuleViolation`   | 422    |
//! | `CourtError::Database`        | 500    |
//! | `CourtError::Internal`        | 500    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courtside_core::errors::CourtError;
use courtside_core::rules::RuleViolation;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use courtside_api::middleware::error_handling::AppError;
/// use courtside_core::errors::CourtError;
///
/// async fn handler(name: Option<String>) -> Result<Json<String>, AppError> {
///     let name = name.ok_or_else(|| CourtError::Validation("name is required".to_string()))?;
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CourtError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CourtError::NotFound(_) => StatusCode::NOT_FOUND,
            CourtError::Validation(_) => StatusCode::BAD_REQUEST,
            CourtError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CourtError::Authorization(_) => StatusCode::FORBIDDEN,
            CourtError::Conflict(_) => StatusCode::CONFLICT,
            CourtError::RuleViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CourtError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CourtError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Full error chain goes to the log, never to the client
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<CourtError> for AppError {
    fn from(err: CourtError) -> Self {
        AppError(err)
    }
}

impl From<RuleViolation> for AppError {
    fn from(err: RuleViolation) -> Self {
        AppError(CourtError::RuleViolation(err))
    }
}

/// Wraps repository errors as `CourtError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CourtError::Database(err))
    }
}
