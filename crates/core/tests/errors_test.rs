use std::error::Error;
use courtside_core::errors::{CourtError, CourtResult};
use courtside_core::rules::RuleViolation;

#[test]
fn test_court_error_display() {
    let not_found = CourtError::NotFound("Reservation not found".to_string());
    let validation = CourtError::Validation("Invalid input".to_string());
    let authentication = CourtError::Authentication("Invalid password".to_string());
    let authorization = CourtError::Authorization("Not authorized".to_string());
    let conflict = CourtError::Conflict("Email already registered".to_string());
    let database = CourtError::Database(eyre::eyre!("Database connection failed"));
    let internal = CourtError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Reservation not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid password"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert_eq!(conflict.to_string(), "Conflict: Email already registered");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_rule_violation_conversion() {
    let error: CourtError = RuleViolation::SlotTaken.into();

    assert!(matches!(error, CourtError::RuleViolation(RuleViolation::SlotTaken)));
    assert_eq!(
        error.to_string(),
        "Booking rule violated: the selected time is already taken"
    );
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let court_error = CourtError::Internal(Box::new(io_error));

    assert!(court_error.source().is_some());
}

#[test]
fn test_court_result() {
    let result: CourtResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: CourtResult<i32> = Err(CourtError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let court_error: CourtError = eyre::eyre!("connection reset").into();

    assert!(matches!(court_error, CourtError::Database(_)));
    assert!(court_error.to_string().contains("connection reset"));
}
