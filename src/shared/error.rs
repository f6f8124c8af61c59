//! Shared Error Types
//!
//! Errors raised while validating input before it reaches storage.
//!
//! - `ValidationError` - A request field holds a value the API refuses
//!
//! # Usage
//!
//! ```rust
//! use platewise::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username must be non-empty!");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reject empty or whitespace-only text for `field`.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(
            field,
            format!("{} must be non-empty!", capitalize(field)),
        ));
    }
    Ok(())
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
