//! Platewise - Main Library
//!
//! Platewise is the HTTP backend of a small social app for restaurant
//! reviews: users post, befriend each other, catalogue restaurants,
//! review them on five axes, record how much each axis matters to them,
//! and keep named groups of restaurants.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Configuration (`AppConfig`)
//!   - Review scores and preference weights
//!   - Validation error types
//!
//! - **`backend`** - The Axum server
//!   - One module per concept (auth, posting, friending, restaurants,
//!     reviewing, weighting, grouping), each with `db` and `handlers`
//!   - Route table, extractors, error mapping
//!   - SQLite persistence through sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use platewise::backend::server::create_app;
//! use platewise::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation failures
//! - `backend::error::BackendError` for everything a handler can return;
//!   it renders as `{"error": ..., "status": ...}`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
