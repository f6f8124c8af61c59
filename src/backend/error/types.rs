/**
 * Backend Error Types
 *
 * This module defines the error type returned by every concept function
 * and HTTP handler. Each variant maps onto one HTTP status code.
 *
 * # Error Categories
 *
 * - `Unauthenticated` - no valid session (401)
 * - `NotAllowed` - the caller may not do this (403)
 * - `NotFound` - the referenced record does not exist (404)
 * - `BadValues` - malformed request values (400)
 * - `Database`, `Token`, `Hash` - infrastructure failures (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use platewise::backend::error::BackendError;
///
/// let err = BackendError::not_found("Post 42 does not exist!");
/// let err = BackendError::not_allowed("Must be logged out!");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request carries no valid session
    #[error("{message}")]
    Unauthenticated {
        message: String,
    },

    /// The caller is authenticated but may not perform the action
    #[error("{message}")]
    NotAllowed {
        message: String,
    },

    /// The referenced record does not exist
    #[error("{message}")]
    NotFound {
        message: String,
    },

    /// The request values are malformed
    #[error("{message}")]
    BadValues {
        message: String,
    },

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session token could not be created
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl BackendError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn not_allowed(message: impl Into<String>) -> Self {
        Self::NotAllowed {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_values(message: impl Into<String>) -> Self {
        Self::BadValues {
            message: message.into(),
        }
    }

    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `NotAllowed` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `BadValues` - 400 Bad Request
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `Database` - 404 for a missing row, 403 for a uniqueness clash, else 500
    /// - `Token`, `Hash` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::NotAllowed { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadValues { .. } => StatusCode::BAD_REQUEST,
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                StatusCode::FORBIDDEN
            }
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message shown to clients
    ///
    /// Infrastructure failures are logged in full but reported with a
    /// generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated { message }
            | Self::NotAllowed { message }
            | Self::NotFound { message }
            | Self::BadValues { message }
            | Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                "Resource already exists".to_string()
            }
            Self::Database(_) | Self::Token(_) | Self::Hash(_) => "Internal server error".to_string(),
        }
    }
}
