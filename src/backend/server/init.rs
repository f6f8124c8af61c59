/**
 * Server Initialization
 *
 * Builds the Axum application from an `AppConfig`:
 * 1. Open the database and run migrations
 * 2. Assemble `AppState`
 * 3. Create the router with every concept route
 *
 * The binary and the integration tests both go through `create_app`, so
 * tests exercise exactly the router that production serves.
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns the database error when the pool cannot be opened or the
/// migrations fail; the server cannot run without storage.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing platewise backend server");

    let db_pool = load_database(&config).await?;
    let app_state = AppState::new(db_pool, config);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
