/**
 * Login and Logout Handlers
 *
 * # Authentication Process
 *
 * 1. Refuse if the caller already holds a live session
 * 2. Verify username and password (bcrypt)
 * 3. Start a session row and sign a token naming it
 * 4. Return the token and user info
 *
 * Unknown usernames and wrong passwords produce the same 403 response.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::{sessions, users};
use crate::backend::doc::Msg;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody, MaybeSession};
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Example Request
///
/// ```http
/// POST /api/login HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "securepassword123" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "msg": "Logged in!",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "123e4567-...", "username": "alice", ... }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    JsonBody(request): JsonBody<LoginRequest>,
) -> BackendResult<Json<LoginResponse>> {
    sessions::is_logged_out(session)?;
    tracing::info!("Login request for: {}", request.username);

    let user = users::authenticate(&state.db_pool, &request.username, &request.password).await?;
    let token = sessions::start(&state.db_pool, &state.session_keys, user.id).await?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(LoginResponse {
        msg: "Logged in!".to_string(),
        token,
        user: user.into(),
    }))
}

/// Logout handler: ends the session named by the caller's token
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> BackendResult<Json<Msg>> {
    sessions::end(&state.db_pool, user.0.session_id).await?;
    Ok(Json(Msg::new("Logged out!")))
}
