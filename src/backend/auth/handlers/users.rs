/**
 * User Account Handlers
 *
 * - `GET /api/users` - list users (optionally `?username=`)
 * - `GET /api/users/{username}` - one user
 * - `POST /api/users` - create an account (caller must be logged out)
 * - `PATCH /api/users/username` - rename the caller
 * - `PATCH /api/users/password` - change the caller's password
 * - `DELETE /api/users` - delete the caller and end their sessions
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{
    CreateUserRequest, CreateUserResponse, UpdatePasswordRequest, UpdateUsernameRequest, UserResponse,
};
use crate::backend::auth::{sessions, users};
use crate::backend::doc::Msg;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AuthUser, JsonBody, MaybeSession, QueryParams};
use crate::backend::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub username: Option<String>,
}

pub async fn get_users(
    State(pool): State<SqlitePool>,
    QueryParams(query): QueryParams<UsersQuery>,
) -> BackendResult<Json<Vec<UserResponse>>> {
    let users = users::get_users(&pool, query.username.as_deref()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> BackendResult<Json<UserResponse>> {
    if username.trim().is_empty() {
        return Err(BackendError::bad_values("Username must be non-empty!"));
    }
    let user = users::get_user_by_username(&pool, &username).await?;
    Ok(Json(user.into()))
}

/// Create an account
///
/// # Errors
///
/// * `403 Forbidden` - caller is logged in, or the username is taken
/// * `400 Bad Request` - empty username or password
pub async fn create_user(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> BackendResult<Json<CreateUserResponse>> {
    sessions::is_logged_out(session)?;
    tracing::info!("Signup request for username: {}", request.username);

    let user = users::create_user(
        &state.db_pool,
        &request.username,
        &request.password,
        state.config.bcrypt_cost,
    )
    .await?;

    Ok(Json(CreateUserResponse {
        msg: "User created successfully!".to_string(),
        user: user.into(),
    }))
}

pub async fn update_username(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<UpdateUsernameRequest>,
) -> BackendResult<Json<Msg>> {
    users::update_username(&state.db_pool, user.user_id(), &request.username).await?;
    Ok(Json(Msg::new("Username updated successfully!")))
}

pub async fn update_password(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<UpdatePasswordRequest>,
) -> BackendResult<Json<Msg>> {
    users::update_password(
        &state.db_pool,
        user.user_id(),
        &request.current_password,
        &request.new_password,
        state.config.bcrypt_cost,
    )
    .await?;
    Ok(Json(Msg::new("Password updated successfully!")))
}

/// Delete the caller's account
///
/// Every session of the user is ended, not only the one making the call.
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<Msg>> {
    let ended = sessions::end_all_for_user(&state.db_pool, user.user_id()).await?;
    users::delete_user(&state.db_pool, user.user_id()).await?;
    tracing::info!("User {} deleted ({} sessions ended)", user.user_id(), ended);
    Ok(Json(Msg::new("User deleted!")))
}
