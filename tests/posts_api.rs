//! Post API integration tests

#[macro_use]
mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{create_test_user, test_server};

#[tokio::test]
async fn test_create_and_list_posts() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;

    let created = server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "first!", "options": { "backgroundColor": "#c0ffee" } }))
        .await;
    let body = assert_msg!(created, "Post successfully created!");
    assert_eq!(body["post"]["author"], "alice");
    assert_eq!(body["post"]["options"]["backgroundColor"], "#c0ffee");

    server
        .post("/api/posts")
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "second" }))
        .await
        .assert_status_ok();

    let all: Vec<Value> = server.get("/api/posts").await.json();
    let contents: Vec<&str> = all.iter().filter_map(|p| p["content"].as_str()).collect();
    assert_eq!(contents, vec!["second", "first!"]);

    let by_alice: Vec<Value> = server.get("/api/posts").add_query_param("author", "alice").await.json();
    assert_eq!(by_alice.len(), 1);
    assert_eq!(by_alice[0]["author"], "alice");

    assert_error!(
        server.get("/api/posts").add_query_param("author", "nobody").await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_post_requires_login_and_content() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;

    let anonymous = server.post("/api/posts").json(&json!({ "content": "hi" })).await;
    assert_error!(anonymous, StatusCode::UNAUTHORIZED, "Must be logged in!");

    let empty = server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "" }))
        .await;
    assert_error!(empty, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_author_edits_and_deletes() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let mallory = create_test_user(&server, "mallory").await;

    let created: Value = server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "original" }))
        .await
        .json();
    let id = created["post"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/posts/{}", id);

    let hijack = server
        .patch(&path)
        .authorization_bearer(&mallory.token)
        .json(&json!({ "content": "pwned" }))
        .await;
    assert_error!(
        hijack,
        StatusCode::FORBIDDEN,
        format!("mallory is not the author of post {}!", id)
    );

    let edit = server
        .patch(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "edited" }))
        .await;
    assert_msg!(edit, "Post successfully updated!");

    let posts: Vec<Value> = server.get("/api/posts").await.json();
    assert_eq!(posts[0]["content"], "edited");

    assert_error!(
        server.delete(&path).authorization_bearer(&mallory.token).await,
        StatusCode::FORBIDDEN
    );
    assert_msg!(
        server.delete(&path).authorization_bearer(&alice.token).await,
        "Post deleted successfully!"
    );
    assert_error!(
        server.delete(&path).authorization_bearer(&alice.token).await,
        StatusCode::NOT_FOUND,
        format!("Post {} does not exist!", id)
    );
}

#[tokio::test]
async fn test_malformed_post_id() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;

    let response = server
        .delete("/api/posts/not-an-id")
        .authorization_bearer(&alice.token)
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "not-an-id is not a valid id!");
}
