//! Restaurant HTTP Handlers
//!
//! Deleting a restaurant also deletes its reviews and drops it from
//! every group that lists it.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::db::{self, RestaurantPatch};
use crate::backend::doc::{parse_id, Msg};
use crate::backend::error::BackendResult;
use crate::backend::grouping;
use crate::backend::middleware::{AuthUser, JsonBody};
use crate::backend::responses::{self, RestaurantResponse};
use crate::backend::reviewing;
use crate::backend::server::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRestaurantResponse {
    pub msg: String,
    pub restaurant: RestaurantResponse,
}

pub async fn get_restaurants(
    State(pool): State<SqlitePool>,
) -> BackendResult<Json<Vec<RestaurantResponse>>> {
    let restaurants = db::get_restaurants(&pool).await?;
    Ok(Json(responses::restaurants(&pool, restaurants).await?))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateRestaurantRequest>,
) -> BackendResult<Json<CreateRestaurantResponse>> {
    let restaurant = db::create_restaurant(
        &state.db_pool,
        user.user_id(),
        &request.name,
        &request.address,
        &request.url,
    )
    .await?;

    Ok(Json(CreateRestaurantResponse {
        msg: "Restaurant successfully created!".to_string(),
        restaurant: responses::restaurant(&state.db_pool, restaurant).await?,
    }))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<RestaurantPatch>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_creator_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::update_restaurant(pool, id, &patch).await?;
    Ok(Json(Msg::new("Restaurant successfully updated!")))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_creator_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    let mut tx = pool.begin().await?;
    db::delete_restaurant(&mut *tx, id).await?;
    let reviews = reviewing::db::delete_by_restaurant(&mut *tx, id).await?;
    let groups = grouping::db::remove_restaurant_everywhere(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(
        "Restaurant {} deleted with {} reviews, removed from {} groups",
        id,
        reviews,
        groups
    );
    Ok(Json(Msg::new("Restaurant deleted successfully!")))
}
