//! Database operations for restaurants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::error::require_non_empty;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Restaurant {
    pub id: Uuid,
    /// User who added the restaurant; only they may edit it
    pub creator: Uuid,
    pub name: String,
    pub address: String,
    pub url: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Partial update of a restaurant's details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub url: Option<String>,
}

const RESTAURANT_COLUMNS: &str = "id, creator, name, address, url, date_created, date_updated";

pub async fn create_restaurant(
    pool: &SqlitePool,
    creator: Uuid,
    name: &str,
    address: &str,
    url: &str,
) -> BackendResult<Restaurant> {
    require_non_empty("name", name)?;
    let created = now();

    let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
        r#"
        INSERT INTO restaurants (id, creator, name, address, url, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {RESTAURANT_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(creator)
    .bind(name)
    .bind(address)
    .bind(url)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await?;

    tracing::info!("Restaurant created: {} ({})", restaurant.name, restaurant.id);
    Ok(restaurant)
}

/// Every restaurant, sorted by name
pub async fn get_restaurants(pool: &SqlitePool) -> BackendResult<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY name COLLATE NOCASE, rowid"
    ))
    .fetch_all(pool)
    .await?;
    Ok(restaurants)
}

pub async fn get_restaurant(pool: &SqlitePool, id: Uuid) -> BackendResult<Restaurant> {
    sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::not_found(format!("Restaurant {} does not exist!", id)))
}

/// # Errors
/// `NotFound` for an unknown id
pub async fn assert_exists(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    get_restaurant(pool, id).await.map(|_| ())
}

pub async fn update_restaurant(pool: &SqlitePool, id: Uuid, patch: &RestaurantPatch) -> BackendResult<()> {
    let restaurant = get_restaurant(pool, id).await?;
    if let Some(name) = &patch.name {
        require_non_empty("name", name)?;
    }

    sqlx::query(
        r#"
        UPDATE restaurants SET name = $1, address = $2, url = $3, date_updated = $4
        WHERE id = $5
        "#,
    )
    .bind(patch.name.as_deref().unwrap_or(&restaurant.name))
    .bind(patch.address.as_deref().unwrap_or(&restaurant.address))
    .bind(patch.url.as_deref().unwrap_or(&restaurant.url))
    .bind(now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_restaurant(conn: &mut SqliteConnection, id: Uuid) -> BackendResult<()> {
    sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// # Errors
/// * `NotFound` - no such restaurant
/// * `NotAllowed` - `user` did not add it
pub async fn assert_creator_is_user(pool: &SqlitePool, id: Uuid, user: Uuid) -> BackendResult<()> {
    let restaurant = get_restaurant(pool, id).await?;
    if restaurant.creator != user {
        return Err(BackendError::not_allowed(format!(
            "{} is not the creator of restaurant {}!",
            user, id
        )));
    }
    Ok(())
}
