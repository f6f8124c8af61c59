/**
 * Application State Management
 *
 * `AppState` is the single state value handed to the router. It holds
 * the database pool, the session signing keys and the loaded
 * configuration. Every field is cheap to clone.
 *
 * The `FromRef` implementation lets read-only handlers extract just the
 * pool, following Axum's recommended pattern.
 *
 * # Example
 *
 * ```rust
 * use platewise::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db_pool;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::shared::AppConfig;

/// Central state container for the Axum application
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool backing every concept
    pub db_pool: SqlitePool,

    /// Keys used to sign and verify session tokens
    pub session_keys: SessionKeys,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: AppConfig) -> Self {
        let session_keys = SessionKeys::new(&config.jwt_secret, config.session_ttl_days);
        Self {
            db_pool,
            session_keys,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
