//! Friending HTTP Handlers
//!
//! Users are addressed by username in paths; ids never leave the server.

use axum::{
    extract::{Path, State},
    Json,
};

use super::db;
use crate::backend::auth::users;
use crate::backend::doc::Msg;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::responses::{self, FriendRequestResponse};
use crate::backend::server::state::AppState;

/// `GET /api/friends` - usernames of the caller's friends
pub async fn get_friends(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<Vec<String>>> {
    let friends = db::get_friends(&state.db_pool, user.user_id()).await?;
    Ok(Json(users::ids_to_usernames(&state.db_pool, &friends).await?))
}

/// `DELETE /api/friends/{friend}`
pub async fn remove_friend(
    State(state): State<AppState>,
    user: AuthUser,
    Path(friend): Path<String>,
) -> BackendResult<Json<Msg>> {
    let pool = &state.db_pool;
    let friend = users::get_user_by_username(pool, &friend).await?;
    let ids = [user.user_id(), friend.id];

    responses::named(pool, db::remove_friend(pool, user.user_id(), friend.id).await, &ids).await?;
    Ok(Json(Msg::new("Unfriended!")))
}

/// `GET /api/friend/requests` - requests the caller sent or received
pub async fn get_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<Vec<FriendRequestResponse>>> {
    let requests = db::get_requests(&state.db_pool, user.user_id()).await?;
    Ok(Json(responses::friend_requests(&state.db_pool, requests).await?))
}

/// `POST /api/friend/requests/{to}`
pub async fn send_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(to): Path<String>,
) -> BackendResult<Json<Msg>> {
    let pool = &state.db_pool;
    let to = users::get_user_by_username(pool, &to).await?;
    let ids = [user.user_id(), to.id];

    responses::named(pool, db::send_request(pool, user.user_id(), to.id).await, &ids).await?;
    tracing::info!("Friend request sent from {} to {}", user.user_id(), to.id);
    Ok(Json(Msg::new("Sent request!")))
}

/// `DELETE /api/friend/requests/{to}`
pub async fn remove_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(to): Path<String>,
) -> BackendResult<Json<Msg>> {
    let pool = &state.db_pool;
    let to = users::get_user_by_username(pool, &to).await?;
    let ids = [user.user_id(), to.id];

    responses::named(pool, db::remove_request(pool, user.user_id(), to.id).await, &ids).await?;
    Ok(Json(Msg::new("Removed request!")))
}

/// `PUT /api/friend/accept/{from}`
pub async fn accept_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(from): Path<String>,
) -> BackendResult<Json<Msg>> {
    let pool = &state.db_pool;
    let from = users::get_user_by_username(pool, &from).await?;
    let ids = [from.id, user.user_id()];

    responses::named(pool, db::accept_request(pool, from.id, user.user_id()).await, &ids).await?;
    Ok(Json(Msg::new("Accepted request!")))
}

/// `PUT /api/friend/reject/{from}`
pub async fn reject_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(from): Path<String>,
) -> BackendResult<Json<Msg>> {
    let pool = &state.db_pool;
    let from = users::get_user_by_username(pool, &from).await?;
    let ids = [from.id, user.user_id()];

    responses::named(pool, db::reject_request(pool, from.id, user.user_id()).await, &ids).await?;
    Ok(Json(Msg::new("Rejected request!")))
}
