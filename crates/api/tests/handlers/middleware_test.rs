use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use courtside_api::middleware::{auth, error_handling::AppError};
use courtside_core::{courts::Court, errors::CourtError, rules::RuleViolation};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(CourtError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
#[case(CourtError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(CourtError::Authentication("who".into()), StatusCode::UNAUTHORIZED)]
#[case(CourtError::Authorization("no".into()), StatusCode::FORBIDDEN)]
#[case(CourtError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(CourtError::RuleViolation(RuleViolation::SlotTaken), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(CourtError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    CourtError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: CourtError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = AppError(CourtError::RuleViolation(RuleViolation::InstructorLimitExceeded {
        court: Court::Futbol,
        limit_hours: 3,
    }))
    .into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Booking rule violated: instructors may hold at most 3 hours per day on futbol"
        })
    );
}

#[test]
fn test_rule_violation_converts_to_app_error() {
    let error = AppError::from(RuleViolation::PaymentProofRequired);
    assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_hash_and_verify_password() {
    let hashed = auth::hash_password("secret123").unwrap();

    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_password(&hashed, "secret123"));
    assert!(!auth::verify_password(&hashed, "secret124"));
}

#[test]
fn test_same_password_hashes_differently() {
    let first = auth::hash_password("secret123").unwrap();
    let second = auth::hash_password("secret123").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_malformed_hash_never_verifies() {
    assert!(!auth::verify_password("not-a-phc-string", "anything"));
}

#[test]
fn test_session_tokens_are_random_alphanumeric() {
    let token = auth::generate_session_token();

    assert_eq!(token.len(), auth::SESSION_TOKEN_LENGTH);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(token, auth::generate_session_token());
}

#[rstest]
#[case("Bearer abc123", Some("abc123"))]
#[case("bearer abc123", Some("abc123"))]
#[case("Bearer   abc123  ", Some("abc123"))]
#[case("Bearer ", None)]
#[case("Basic dXNlcjpwYXNz", None)]
#[case("abc123", None)]
fn test_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(header).unwrap());

    assert_eq!(auth::bearer_token(&headers), expected);
}

#[test]
fn test_bearer_token_missing_header() {
    assert_eq!(auth::bearer_token(&HeaderMap::new()), None);
}
