use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use courtside_core::courts::CourtInfo;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::test_server;

#[tokio::test]
async fn test_health() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let server = test_server();

    let body: Value = server.get("/version").await.json();

    assert_eq!(body["name"], "courtside-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_courts_catalogue() {
    let server = test_server();

    let courts: Vec<CourtInfo> = server.get("/api/courts").await.json();

    let names: Vec<&str> = courts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Tenis 1", "Tenis 2", "Fútbol", "Básquet", "Vóley", "Picketball"]
    );
    assert_eq!(courts.iter().filter(|c| c.allows_two_hour_booking).count(), 1);
}

#[rstest]
#[case("/api/auth/me")]
#[case("/api/reservations")]
#[case("/api/notifications")]
#[case("/api/notifications/unread")]
#[case("/api/admin/users")]
#[case("/api/admin/reservations")]
#[case("/api/admin/settings")]
#[case("/api/admin/stats")]
#[case("/api/admin/dashboard")]
#[case("/api/admin/changes")]
#[tokio::test]
async fn test_protected_routes_require_a_session(#[case] path: &str) {
    let server = test_server();

    let response = server.get(path).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": "Authentication error: Missing bearer token" }));
}

#[tokio::test]
async fn test_non_bearer_authorization_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_requires_a_session_before_reading_the_body() {
    let server = test_server();

    let response = server
        .post("/api/reservations")
        .json(&json!({ "court": "tenis1", "date": "2026-10-16", "start": "08:00" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = test_server();

    server
        .get("/api/nothing-here")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
