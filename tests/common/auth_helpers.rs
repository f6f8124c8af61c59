//! Authentication test helpers
//!
//! Create accounts and log them in through the public API, returning the
//! bearer token to attach to later requests.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "test_password_123";

/// A logged-in test account
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// `POST /api/users`, asserting success
pub async fn create_account(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "signup failed: {}", response.text());
    response.json()
}

/// `POST /api/login`, returning the token
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed: {}", response.text());

    let body: Value = response.json();
    body["token"].as_str().expect("login returns a token").to_string()
}

/// Create an account and log it in
pub async fn create_test_user(server: &TestServer, username: &str) -> TestUser {
    let created = create_account(server, username, TEST_PASSWORD).await;
    let token = login(server, username, TEST_PASSWORD).await;

    TestUser {
        id: created["user"]["id"].as_str().expect("user id").to_string(),
        username: username.to_string(),
        token,
    }
}

/// Make `a` and `b` friends through the request / accept flow
pub async fn befriend(server: &TestServer, a: &TestUser, b: &TestUser) {
    server
        .post(&format!("/api/friend/requests/{}", b.username))
        .authorization_bearer(&a.token)
        .await
        .assert_status_ok();
    server
        .put(&format!("/api/friend/accept/{}", a.username))
        .authorization_bearer(&b.token)
        .await
        .assert_status_ok();
}
