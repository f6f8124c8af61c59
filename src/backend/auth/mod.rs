//! Authentication Module
//!
//! User accounts (the Authing concept), login sessions (Sessioning), and
//! the HTTP handlers that expose them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - Session rows and JWT tokens
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Create**: `POST /api/users` with username and password
//! 2. **Login**: `POST /api/login` → session row created → bearer token returned
//! 3. **Use**: `Authorization: Bearer <token>` on protected routes
//! 4. **Logout**: `POST /api/logout` → session row deleted, token dead
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are only honoured while their session row exists
//! - Invalid credentials return 403 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// Session storage and token signing
pub mod sessions;

/// HTTP handlers for account and session endpoints
pub mod handlers;
