/**
 * Authentication Handler Types
 *
 * Request and response bodies for the user and session endpoints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Create-account request
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateUserRequest {
    pub username: String,
    /// Plain password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// User response (without sensitive data)
///
/// Never includes the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            date_created: user.date_created,
            date_updated: user.date_updated,
        }
    }
}

/// Returned by account creation
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateUserResponse {
    pub msg: String,
    pub user: UserResponse,
}

/// Returned by login
///
/// Contains the bearer token for subsequent requests.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
    pub user: UserResponse,
}
