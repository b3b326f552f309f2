use axum::http::StatusCode;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use test_log::test;

use crate::test_utils::test_server;

fn registration(password: &str, confirm: &str) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "name": name,
        "email": email,
        "password": password,
        "confirm_password": confirm,
        "manzana": "12",
        "villa": "4",
    })
}

#[test(tokio::test)]
async fn test_register_rejects_mismatched_passwords() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&registration("secret123", "secret321"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Validation error: Passwords do not match" }));
}

#[test(tokio::test)]
async fn test_register_rejects_short_password() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&registration("abc", "abc"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_register_requires_household() {
    let server = test_server();
    let mut body = registration("secret123", "secret123");
    body["villa"] = json!("   ");

    let response = server.post("/api/auth/register").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Validation error: villa is required" }));
}

#[test(tokio::test)]
async fn test_login_requires_credentials() {
    let server = test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "", "password": "secret123" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_password_recovery_requires_email() {
    let server = test_server();

    let response = server
        .post("/api/auth/password-recovery")
        .json(&json!({ "email": "  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
