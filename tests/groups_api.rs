//! Restaurant group API integration tests

#[macro_use]
mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{befriend, create_test_user, test_server, TestUser};

async fn add_restaurant(server: &TestServer, user: &TestUser, name: &str) -> String {
    let body: Value = server
        .post("/api/restaurants")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": name }))
        .await
        .json();
    body["restaurant"]["id"].as_str().unwrap().to_string()
}

async fn create_group(server: &TestServer, user: &TestUser, name: &str, restaurants: &[&str]) -> String {
    let response = server
        .post("/api/groups")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": name, "restaurants": restaurants }))
        .await;
    let body = assert_msg!(response, "Group successfully created!");
    body["group"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_group_membership() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let a = add_restaurant(&server, &alice, "A16").await;
    let b = add_restaurant(&server, &alice, "Beretta").await;

    let group = create_group(&server, &alice, "italian", &[&a]).await;
    let path = format!("/api/groups/{}", group);

    assert_msg!(
        server.patch(&path).authorization_bearer(&alice.token).json(&json!({ "restaurant": b })).await,
        "Restaurant added to group!"
    );
    assert_error!(
        server.patch(&path).authorization_bearer(&alice.token).json(&json!({ "restaurant": a })).await,
        StatusCode::FORBIDDEN
    );

    let groups: Vec<Value> = server
        .get("/api/groups/user")
        .authorization_bearer(&alice.token)
        .add_query_param("user", "alice")
        .await
        .json();
    assert_eq!(groups[0]["owner"], "alice");
    assert_eq!(groups[0]["restaurants"], json!([a, b]));

    assert_msg!(
        server
            .delete(&format!("{}/restaurants/{}", path, a))
            .authorization_bearer(&alice.token)
            .await,
        "Restaurant removed from group!"
    );
    assert_error!(
        server
            .delete(&format!("{}/restaurants/{}", path, a))
            .authorization_bearer(&alice.token)
            .await,
        StatusCode::NOT_FOUND
    );

    assert_msg!(
        server.delete(&path).authorization_bearer(&alice.token).await,
        "Group deleted successfully!"
    );
    let groups: Vec<Value> = server
        .get("/api/groups/user")
        .authorization_bearer(&alice.token)
        .add_query_param("user", "alice")
        .await
        .json();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_group_creation_checks_restaurants() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let missing = uuid::Uuid::new_v4().to_string();

    assert_error!(
        server
            .post("/api/groups")
            .authorization_bearer(&alice.token)
            .json(&json!({ "name": "ghosts", "restaurants": [missing] }))
            .await,
        StatusCode::NOT_FOUND
    );
    assert_error!(
        server
            .post("/api/groups")
            .authorization_bearer(&alice.token)
            .json(&json!({ "name": "", "restaurants": [] }))
            .await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_groups_visible_to_friends_only() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    let eve = create_test_user(&server, "eve").await;
    let r = add_restaurant(&server, &alice, "Kokkari").await;
    create_group(&server, &alice, "greek", &[&r]).await;
    create_group(&server, &alice, "brunch", &[]).await;
    befriend(&server, &alice, &bob).await;

    let seen: Vec<Value> = server
        .get("/api/groups/user")
        .authorization_bearer(&bob.token)
        .add_query_param("user", "alice")
        .await
        .json();
    assert_eq!(seen.len(), 2);

    let named: Vec<Value> = server
        .get("/api/groups/user")
        .authorization_bearer(&bob.token)
        .add_query_param("user", "alice")
        .add_query_param("name", "greek")
        .await
        .json();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0]["name"], "greek");

    assert_error!(
        server
            .get("/api/groups/user")
            .authorization_bearer(&eve.token)
            .add_query_param("user", "alice")
            .await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_only_owner_edits_group() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    let group = create_group(&server, &alice, "mine", &[]).await;

    assert_error!(
        server.delete(&format!("/api/groups/{}", group)).authorization_bearer(&bob.token).await,
        StatusCode::FORBIDDEN,
        format!("bob is not the owner of group {}!", group)
    );
}

#[tokio::test]
async fn test_groups_query_needs_user() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;

    let response = server.get("/api/groups/user").authorization_bearer(&alice.token).await;
    let body = assert_error!(response, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("user"));
}
