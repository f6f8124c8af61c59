//! Restaurant and review API integration tests

#[macro_use]
mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{create_test_user, test_server, TestUser};

async fn add_restaurant(server: &TestServer, user: &TestUser, name: &str) -> String {
    let response = server
        .post("/api/restaurants")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": name, "address": "1 Main St", "url": "https://example.com" }))
        .await;
    let body = assert_msg!(response, "Restaurant successfully created!");
    body["restaurant"]["id"].as_str().unwrap().to_string()
}

fn review_body(restaurant: &str, score: i64) -> Value {
    json!({
        "restaurant": restaurant,
        "comment": "solid",
        "food": score,
        "ambience": score,
        "service": score,
        "price": score,
        "novelty": score,
    })
}

#[tokio::test]
async fn test_restaurant_crud() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;

    let id = add_restaurant(&server, &alice, "Zazie").await;
    add_restaurant(&server, &bob, "Burma Superstar").await;

    let all: Vec<Value> = server.get("/api/restaurants").await.json();
    let names: Vec<&str> = all.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["Burma Superstar", "Zazie"]);
    assert_eq!(all[1]["creator"], "alice");

    let path = format!("/api/restaurants/{}", id);
    assert_error!(
        server.patch(&path).authorization_bearer(&bob.token).json(&json!({ "name": "Mine" })).await,
        StatusCode::FORBIDDEN
    );
    assert_msg!(
        server.patch(&path).authorization_bearer(&alice.token).json(&json!({ "url": "https://zazie.example" })).await,
        "Restaurant successfully updated!"
    );

    let all: Vec<Value> = server.get("/api/restaurants").await.json();
    assert_eq!(all[1]["url"], "https://zazie.example");
    assert_eq!(all[1]["address"], "1 Main St");

    assert_error!(
        server.post("/api/restaurants").authorization_bearer(&alice.token).json(&json!({ "name": "" })).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_reviews_lifecycle() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    let restaurant = add_restaurant(&server, &alice, "Nopa").await;
    let other = add_restaurant(&server, &alice, "Nopalito").await;

    let created = server
        .post("/api/reviews")
        .authorization_bearer(&alice.token)
        .json(&review_body(&restaurant, 4))
        .await;
    let body = assert_msg!(created, "Review successfully created!");
    assert_eq!(body["review"]["reviewer"], "alice");
    assert_eq!(body["review"]["food"], 4);
    let review_id = body["review"]["id"].as_str().unwrap().to_string();

    assert_error!(
        server.post("/api/reviews").authorization_bearer(&alice.token).json(&review_body(&restaurant, 2)).await,
        StatusCode::FORBIDDEN
    );
    assert_error!(
        server.post("/api/reviews").authorization_bearer(&bob.token).json(&review_body(&restaurant, 9)).await,
        StatusCode::BAD_REQUEST
    );

    server
        .post("/api/reviews")
        .authorization_bearer(&bob.token)
        .json(&review_body(&restaurant, 5))
        .await
        .assert_status_ok();
    server
        .post("/api/reviews")
        .authorization_bearer(&bob.token)
        .json(&review_body(&other, 3))
        .await
        .assert_status_ok();

    let all: Vec<Value> = server.get("/api/reviews").await.json();
    assert_eq!(all.len(), 3);
    let by_bob: Vec<Value> = server.get("/api/reviews").add_query_param("reviewer", "bob").await.json();
    assert_eq!(by_bob.len(), 2);
    let for_nopa: Vec<Value> = server.get("/api/reviews").add_query_param("restaurant", &restaurant).await.json();
    assert_eq!(for_nopa.len(), 2);
    let both: Vec<Value> = server
        .get("/api/reviews")
        .add_query_param("reviewer", "bob")
        .add_query_param("restaurant", &other)
        .await
        .json();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["novelty"], 3);

    let path = format!("/api/reviews/{}", review_id);
    assert_error!(
        server.patch(&path).authorization_bearer(&bob.token).json(&json!({ "food": 1 })).await,
        StatusCode::FORBIDDEN,
        format!("bob is not the reviewer of review {}!", review_id)
    );
    assert_msg!(
        server.patch(&path).authorization_bearer(&alice.token).json(&json!({ "food": 1, "comment": "meh" })).await,
        "Review successfully updated!"
    );
    let mine: Vec<Value> = server.get("/api/reviews").add_query_param("reviewer", "alice").await.json();
    assert_eq!(mine[0]["food"], 1);
    assert_eq!(mine[0]["service"], 4);
    assert_eq!(mine[0]["comment"], "meh");

    assert_msg!(
        server.delete(&path).authorization_bearer(&alice.token).await,
        "Review deleted successfully!"
    );
}

#[tokio::test]
async fn test_review_needs_existing_restaurant() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let missing = uuid::Uuid::new_v4().to_string();

    assert_error!(
        server.post("/api/reviews").authorization_bearer(&alice.token).json(&review_body(&missing, 3)).await,
        StatusCode::NOT_FOUND,
        format!("Restaurant {} does not exist!", missing)
    );
    assert_error!(
        server.post("/api/reviews").authorization_bearer(&alice.token).json(&review_body("nope", 3)).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_delete_restaurant_cascades() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;
    let restaurant = add_restaurant(&server, &alice, "Flour + Water").await;
    let kept = add_restaurant(&server, &alice, "Delfina").await;

    server
        .post("/api/reviews")
        .authorization_bearer(&alice.token)
        .json(&review_body(&restaurant, 5))
        .await
        .assert_status_ok();
    server
        .post("/api/groups")
        .authorization_bearer(&alice.token)
        .json(&json!({ "name": "pasta", "restaurants": [restaurant, kept] }))
        .await
        .assert_status_ok();

    assert_msg!(
        server
            .delete(&format!("/api/restaurants/{}", restaurant))
            .authorization_bearer(&alice.token)
            .await,
        "Restaurant deleted successfully!"
    );

    let reviews: Vec<Value> = server.get("/api/reviews").await.json();
    assert!(reviews.is_empty());

    let groups: Vec<Value> = server
        .get("/api/groups/user")
        .authorization_bearer(&alice.token)
        .add_query_param("user", "alice")
        .await
        .json();
    assert_eq!(groups[0]["restaurants"], json!([kept]));
}

#[tokio::test]
async fn test_malformed_review_is_json_error() {
    let server = test_server().await;
    let alice = create_test_user(&server, "alice").await;

    let mistyped = server
        .post("/api/reviews")
        .authorization_bearer(&alice.token)
        .json(&json!({ "food": "4" }))
        .await;
    let body = assert_error!(mistyped, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to deserialize"));

    let not_json = server
        .post("/api/reviews")
        .authorization_bearer(&alice.token)
        .text("food=4")
        .await;
    assert_error!(not_json, StatusCode::BAD_REQUEST);
}
