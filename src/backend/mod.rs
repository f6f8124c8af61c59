//! Backend Module
//!
//! All server-side code: the Axum application, its concepts and the
//! route layer that composes them.
//!
//! # Architecture
//!
//! Each concept owns its tables and exposes plain async functions over a
//! `&SqlitePool` in its `db` module. Its `handlers` module is the route
//! layer for that concept: it authenticates the caller, checks ownership
//! and calls into one or more concepts.
//!
//! - **`server`** - Server initialization, application state, database
//! - **`routes`** - HTTP route table and router assembly
//! - **`auth`** - Users, sessions and their handlers
//! - **`posting`** - Posts
//! - **`friending`** - Friend requests and friendships
//! - **`restaurants`** - Restaurant catalogue
//! - **`reviewing`** - Scored reviews
//! - **`weighting`** - Per-user preference weights
//! - **`grouping`** - Named restaurant lists
//! - **`responses`** - Id-to-username translation for outward records
//! - **`middleware`** - Authentication extractors
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── doc.rs          - Ids, timestamps, `{msg}` bodies
//! ├── responses.rs    - Outward response shapes
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── posting/        - Posts
//! ├── friending/      - Friends
//! ├── restaurants/    - Restaurants
//! ├── reviewing/      - Reviews
//! ├── weighting/      - Weightings
//! ├── grouping/       - Groups
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Request extractors
pub mod middleware;

/// Shared record helpers
pub mod doc;

/// Outward response shapes
pub mod responses;

pub mod posting;
pub mod friending;
pub mod restaurants;
pub mod reviewing;
pub mod weighting;
pub mod grouping;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
