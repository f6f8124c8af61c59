//! Database operations for weightings

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{Weights, WeightsPatch};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Weighting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food: f64,
    pub ambience: f64,
    pub service: f64,
    pub price: f64,
    pub novelty: f64,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Weighting {
    pub fn weights(&self) -> Weights {
        Weights {
            food: self.food,
            ambience: self.ambience,
            service: self.service,
            price: self.price,
            novelty: self.novelty,
        }
    }
}

const WEIGHTING_COLUMNS: &str =
    "id, user_id, food, ambience, service, price, novelty, date_created, date_updated";

/// # Errors
/// * `BadValues` - a negative or non-finite weight
/// * `NotAllowed` - `user` already has a weighting
pub async fn create_weighting(pool: &SqlitePool, user: Uuid, weights: &Weights) -> BackendResult<Weighting> {
    weights.validate()?;
    if !get_user_weighting(pool, user).await?.is_empty() {
        return Err(BackendError::not_allowed(format!("{} already has a weighting!", user)));
    }

    let created = now();
    let weighting = sqlx::query_as::<_, Weighting>(&format!(
        r#"
        INSERT INTO weightings (id, user_id, food, ambience, service, price, novelty, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {WEIGHTING_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(user)
    .bind(weights.food)
    .bind(weights.ambience)
    .bind(weights.service)
    .bind(weights.price)
    .bind(weights.novelty)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await?;

    Ok(weighting)
}

/// Every weighting, newest first
pub async fn get_weightings(pool: &SqlitePool) -> BackendResult<Vec<Weighting>> {
    let weightings = sqlx::query_as::<_, Weighting>(&format!(
        "SELECT {WEIGHTING_COLUMNS} FROM weightings ORDER BY date_created DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(weightings)
}

/// The weightings belonging to `user` (zero or one)
pub async fn get_user_weighting(pool: &SqlitePool, user: Uuid) -> BackendResult<Vec<Weighting>> {
    let weightings = sqlx::query_as::<_, Weighting>(&format!(
        "SELECT {WEIGHTING_COLUMNS} FROM weightings WHERE user_id = $1"
    ))
    .bind(user)
    .fetch_all(pool)
    .await?;
    Ok(weightings)
}

pub async fn get_weighting(pool: &SqlitePool, id: Uuid) -> BackendResult<Weighting> {
    sqlx::query_as::<_, Weighting>(&format!(
        "SELECT {WEIGHTING_COLUMNS} FROM weightings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::not_found(format!("Weighting {} does not exist!", id)))
}

async fn store_weights(pool: &SqlitePool, id: Uuid, weights: &Weights) -> BackendResult<()> {
    sqlx::query(
        r#"
        UPDATE weightings
        SET food = $1, ambience = $2, service = $3, price = $4, novelty = $5, date_updated = $6
        WHERE id = $7
        "#,
    )
    .bind(weights.food)
    .bind(weights.ambience)
    .bind(weights.service)
    .bind(weights.price)
    .bind(weights.novelty)
    .bind(now())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_weighting(pool: &SqlitePool, id: Uuid, patch: &WeightsPatch) -> BackendResult<()> {
    let weights = get_weighting(pool, id).await?.weights().apply(patch);
    weights.validate()?;
    store_weights(pool, id, &weights).await
}

/// Put every weight back to the default
pub async fn reset_weighting(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    get_weighting(pool, id).await?;
    store_weights(pool, id, &Weights::default()).await
}

pub async fn assert_user_weighting(pool: &SqlitePool, id: Uuid, user: Uuid) -> BackendResult<()> {
    let weighting = get_weighting(pool, id).await?;
    if weighting.user_id != user {
        return Err(BackendError::not_allowed(format!(
            "{} is not the user for weighting {}!",
            user, id
        )));
    }
    Ok(())
}
