//! Common test utilities and helpers
//!
//! Every integration test drives the real router built by `create_app`
//! against a private in-memory database.
//!
//! - Test server fixture
//! - Authentication helpers
//! - Response assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;

use axum_test::TestServer;
use platewise::backend::routes::create_router;
use platewise::backend::server::config::load_database;
use platewise::backend::server::{create_app, AppState};
use platewise::shared::AppConfig;
use sqlx::SqlitePool;

pub use auth_helpers::*;

/// Cheapest bcrypt cost; hashing dominates test time otherwise
pub const TEST_BCRYPT_COST: u32 = 4;

fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret("integration-test-secret")
        .bcrypt_cost(TEST_BCRYPT_COST)
        .build()
        .expect("Test configuration should be valid")
}

/// Build a server over a fresh in-memory database
pub async fn test_server() -> TestServer {
    let app = create_app(test_config()).await.expect("Failed to create app");
    TestServer::new(app).expect("Failed to start test server")
}

/// Like [`test_server`], but also hand back the pool so a test can
/// rewrite stored rows directly
pub async fn test_server_with_pool() -> (TestServer, SqlitePool) {
    let config = test_config();
    let pool = load_database(&config).await.expect("Failed to open database");
    let app = create_router(AppState::new(pool.clone(), config));
    (TestServer::new(app).expect("Failed to start test server"), pool)
}
