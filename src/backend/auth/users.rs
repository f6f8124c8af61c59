/**
 * User Model and Database Operations
 *
 * Accounts are a unique username plus a bcrypt password hash. All
 * lookups that the route layer exposes go through here, including the
 * id-to-username translation used when rendering responses.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::error::require_non_empty;

/// Placeholder shown for ids whose account no longer exists
pub const DELETED_USER: &str = "DELETED_USER";

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, non-empty)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub date_created: DateTime<Utc>,
    /// Updated at timestamp
    pub date_updated: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, username, password_hash, date_created, date_updated";

fn assert_good_credentials(username: &str, password: &str) -> BackendResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(BackendError::bad_values("Username and password must be non-empty!"));
    }
    Ok(())
}

async fn assert_username_unique(pool: &SqlitePool, username: &str) -> BackendResult<()> {
    if find_user_by_username(pool, username).await?.is_some() {
        return Err(BackendError::not_allowed(format!(
            "User with username {} already exists!",
            username
        )));
    }
    Ok(())
}

/// Create a new user
///
/// # Errors
/// * `BadValues` - empty username or password
/// * `NotAllowed` - username already taken
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> BackendResult<User> {
    assert_good_credentials(username, password)?;
    assert_username_unique(pool, username).await?;

    let password_hash = bcrypt::hash(password, bcrypt_cost)?;
    let created = now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, password_hash, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(username)
    .bind(&password_hash)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);
    Ok(user)
}

/// Look up a user by username, `None` when absent
pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> BackendResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Errors
/// `NotFound` when no user has that name
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> BackendResult<User> {
    find_user_by_username(pool, username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found!"))
}

/// Get user by ID
///
/// # Errors
/// `NotFound` when no user has that id
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> BackendResult<User> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found!"))
}

/// All users, or only the one named `username`
pub async fn get_users(pool: &SqlitePool, username: Option<&str>) -> BackendResult<Vec<User>> {
    let users = match username {
        Some(username) => {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
            ))
            .bind(username)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY username"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(users)
}

/// Translate ids into usernames, preserving order
///
/// Ids without an account come back as [`DELETED_USER`].
pub async fn ids_to_usernames(pool: &SqlitePool, ids: &[Uuid]) -> BackendResult<Vec<String>> {
    let mut known: HashMap<Uuid, String> = HashMap::new();
    for id in ids {
        if known.contains_key(id) {
            continue;
        }
        let name: Option<(String,)> = sqlx::query_as("SELECT username FROM users WHERE id = $1")
            .bind(*id)
            .fetch_optional(pool)
            .await?;
        known.insert(*id, name.map(|(n,)| n).unwrap_or_else(|| DELETED_USER.to_string()));
    }

    Ok(ids.iter().map(|id| known[id].clone()).collect())
}

/// Check a username/password pair
///
/// # Errors
/// `NotAllowed` for an unknown user or a wrong password; the two cases
/// are indistinguishable to the caller.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> BackendResult<User> {
    let incorrect = || BackendError::not_allowed("Username or password is incorrect.");

    let user = find_user_by_username(pool, username).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", username);
        incorrect()
    })?;

    if !bcrypt::verify(password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", username);
        return Err(incorrect());
    }

    Ok(user)
}

/// Rename a user
pub async fn update_username(pool: &SqlitePool, id: Uuid, username: &str) -> BackendResult<()> {
    require_non_empty("username", username)?;
    assert_username_unique(pool, username).await?;

    let result = sqlx::query("UPDATE users SET username = $1, date_updated = $2 WHERE id = $3")
        .bind(username)
        .bind(now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("User not found!"));
    }
    Ok(())
}

/// Change a password after checking the current one
///
/// # Errors
/// * `NotFound` - no such user
/// * `NotAllowed` - `current` does not match
/// * `BadValues` - `new` is empty
pub async fn update_password(
    pool: &SqlitePool,
    id: Uuid,
    current: &str,
    new: &str,
    bcrypt_cost: u32,
) -> BackendResult<()> {
    let user = get_user_by_id(pool, id).await?;

    if !bcrypt::verify(current, &user.password_hash)? {
        return Err(BackendError::not_allowed("The given current password is wrong!"));
    }
    if new.is_empty() {
        return Err(BackendError::bad_values("Password must be non-empty!"));
    }

    let password_hash = bcrypt::hash(new, bcrypt_cost)?;
    sqlx::query("UPDATE users SET password_hash = $1, date_updated = $2 WHERE id = $3")
        .bind(&password_hash)
        .bind(now())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete a user account
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
