/**
 * Get Current User Handler
 *
 * `GET /api/session` returns the account behind the caller's session.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// # Errors
///
/// * `401 Unauthorized` - no live session
/// * `404 Not Found` - the session outlived its account
pub async fn get_session_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<UserResponse>> {
    let user = users::get_user_by_id(&state.db_pool, user.user_id()).await?;
    Ok(Json(user.into()))
}
