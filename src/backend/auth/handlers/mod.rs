//! Authentication Handlers Module
//!
//! HTTP handlers for accounts and sessions.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── users.rs    - Account CRUD handlers
//! ├── login.rs    - Login / logout
//! └── me.rs       - Current session user
//! ```

/// Request and response types
pub mod types;

/// Account handlers
pub mod users;

/// Login and logout handlers
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};

pub use login::{login, logout};
pub use me::get_session_user;
pub use users::{create_user, delete_user, get_user, get_users, update_password, update_username};
