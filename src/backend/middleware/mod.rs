//! Middleware Module
//!
//! Request processing that runs before handler bodies.
//!
//! - **`auth`** - bearer-token session extractors (`AuthUser`, `MaybeSession`)
//! - **`extract`** - JSON body and query extractors that reject with `BackendError`
//!
//! # Example
//!
//! ```rust,no_run
//! use platewise::backend::middleware::AuthUser;
//!
//! async fn handler(user: AuthUser) -> String {
//!     user.user_id().to_string()
//! }
//! ```

pub mod auth;
pub mod extract;

pub use auth::{bearer_token, AuthUser, MaybeSession};
pub use extract::{JsonBody, QueryParams};
