//! Shared Module
//!
//! Types that are independent of the HTTP layer: validation errors,
//! application configuration, and the score records shared by reviews
//! and weightings.
//!
//! Nothing in here touches the database or axum, so these types can be
//! unit tested on their own and reused by clients of the API.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Review scores and preference weights
pub mod scores;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use scores::{ReviewScores, ReviewScoresPatch, Weights, WeightsPatch};
