//! Grouping HTTP Handlers
//!
//! - `GET /api/groups/user?user=&name=` - the caller or a friend of `user` only
//! - `POST /api/groups`
//! - `PATCH /api/groups/{id}` - add a restaurant
//! - `DELETE /api/groups/{id}/restaurants/{restaurant}` - remove a restaurant
//! - `DELETE /api/groups/{id}`

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::db;
use crate::backend::auth::users;
use crate::backend::doc::{parse_id, Msg};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::friending;
use crate::backend::middleware::{AuthUser, JsonBody, QueryParams};
use crate::backend::responses::{self, GroupResponse};
use crate::backend::restaurants;
use crate::backend::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GroupsQuery {
    pub user: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub restaurants: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AddRestaurantRequest {
    pub restaurant: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateGroupResponse {
    pub msg: String,
    pub group: GroupResponse,
}

pub async fn get_user_groups(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(query): QueryParams<GroupsQuery>,
) -> BackendResult<Json<Vec<GroupResponse>>> {
    let pool = &state.db_pool;
    let owner = users::get_user_by_username(pool, &query.user).await?;

    if owner.id != user.user_id() && !friending::db::are_friends(pool, user.user_id(), owner.id).await? {
        tracing::warn!("{} tried to read the groups of {}", user.user_id(), owner.id);
        return Err(BackendError::not_allowed(format!(
            "Must be friends with {} to see their groups!",
            owner.username
        )));
    }

    let name = query.name.as_deref().filter(|n| !n.is_empty());
    let groups = db::get_groups_by_owner(pool, owner.id, name).await?;
    Ok(Json(responses::groups(pool, groups).await?))
}

pub async fn create_group(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateGroupRequest>,
) -> BackendResult<Json<CreateGroupResponse>> {
    let pool = &state.db_pool;

    let mut restaurant_ids = Vec::with_capacity(request.restaurants.len());
    for raw in &request.restaurants {
        let id = parse_id(raw)?;
        restaurants::db::assert_exists(pool, id).await?;
        restaurant_ids.push(id);
    }

    let group = db::create_group(pool, user.user_id(), &request.name, &restaurant_ids).await?;
    Ok(Json(CreateGroupResponse {
        msg: "Group successfully created!".to_string(),
        group: responses::group(pool, group).await?,
    }))
}

pub async fn delete_group(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_owner_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::delete_group(pool, id).await?;
    Ok(Json(Msg::new("Group deleted successfully!")))
}

pub async fn add_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<AddRestaurantRequest>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let restaurant = parse_id(&request.restaurant)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_owner_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;
    restaurants::db::assert_exists(pool, restaurant).await?;

    db::add_restaurant(pool, id, restaurant).await?;
    Ok(Json(Msg::new("Restaurant added to group!")))
}

pub async fn remove_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, restaurant)): Path<(String, String)>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let restaurant = parse_id(&restaurant)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_owner_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::remove_restaurant(pool, id, restaurant).await?;
    Ok(Json(Msg::new("Restaurant removed from group!")))
}
