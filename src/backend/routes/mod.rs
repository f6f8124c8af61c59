//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly, layers and fallback
//! └── api_routes.rs   - The `/api` route table
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use platewise::backend::routes::create_router;
//! use platewise::backend::server::{config::load_database, AppState};
//! use platewise::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let pool = load_database(&config).await?;
//! let router = create_router(AppState::new(pool, config));
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint table
pub mod api_routes;

pub use router::create_router;
