//! Database operations for restaurant groups
//!
//! Group rows live in `restaurant_groups`; membership lives in
//! `group_restaurants`, ordered by `position`.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::error::require_non_empty;

#[derive(Debug, Clone, sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    owner: Uuid,
    name: String,
    date_created: DateTime<Utc>,
    date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    /// Restaurant ids in insertion order
    pub restaurants: Vec<Uuid>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

const GROUP_COLUMNS: &str = "id, owner, name, date_created, date_updated";

async fn with_restaurants(pool: &SqlitePool, row: GroupRow) -> BackendResult<Group> {
    let restaurants: Vec<(Uuid,)> = sqlx::query_as(
        "SELECT restaurant FROM group_restaurants WHERE group_id = $1 ORDER BY position",
    )
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    Ok(Group {
        id: row.id,
        owner: row.owner,
        name: row.name,
        restaurants: restaurants.into_iter().map(|(r,)| r).collect(),
        date_created: row.date_created,
        date_updated: row.date_updated,
    })
}

/// Create a group holding `restaurants`
///
/// Repeated ids are kept once. The caller checks that every restaurant exists.
pub async fn create_group(
    pool: &SqlitePool,
    owner: Uuid,
    name: &str,
    restaurants: &[Uuid],
) -> BackendResult<Group> {
    require_non_empty("name", name)?;
    let created = now();
    let id = new_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO restaurant_groups (id, owner, name, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(name)
    .bind(created)
    .bind(created)
    .execute(&mut *tx)
    .await?;

    let mut members: Vec<Uuid> = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        if members.contains(restaurant) {
            continue;
        }
        sqlx::query("INSERT INTO group_restaurants (group_id, restaurant, position) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(*restaurant)
            .bind(members.len() as i64)
            .execute(&mut *tx)
            .await?;
        members.push(*restaurant);
    }
    tx.commit().await?;

    tracing::info!("Group {} created with {} restaurants", id, members.len());
    Ok(Group {
        id,
        owner,
        name: name.to_string(),
        restaurants: members,
        date_created: created,
        date_updated: created,
    })
}

pub async fn get_group(pool: &SqlitePool, id: Uuid) -> BackendResult<Group> {
    let row = sqlx::query_as::<_, GroupRow>(&format!(
        "SELECT {GROUP_COLUMNS} FROM restaurant_groups WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::not_found(format!("Group {} does not exist!", id)))?;

    with_restaurants(pool, row).await
}

/// Groups owned by `owner`, optionally only those called `name`
pub async fn get_groups_by_owner(
    pool: &SqlitePool,
    owner: Uuid,
    name: Option<&str>,
) -> BackendResult<Vec<Group>> {
    let rows = sqlx::query_as::<_, GroupRow>(&format!(
        r#"
        SELECT {GROUP_COLUMNS} FROM restaurant_groups
        WHERE owner = $1 AND ($2 IS NULL OR name = $2)
        ORDER BY date_created DESC, rowid DESC
        "#
    ))
    .bind(owner)
    .bind(name)
    .fetch_all(pool)
    .await?;

    let mut groups = Vec::with_capacity(rows.len());
    for row in rows {
        groups.push(with_restaurants(pool, row).await?);
    }
    Ok(groups)
}

async fn touch(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    sqlx::query("UPDATE restaurant_groups SET date_updated = $1 WHERE id = $2")
        .bind(now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Append `restaurant` to the group
///
/// # Errors
/// `NotAllowed` when the restaurant is already listed
pub async fn add_restaurant(pool: &SqlitePool, id: Uuid, restaurant: Uuid) -> BackendResult<()> {
    let group = get_group(pool, id).await?;
    if group.restaurants.contains(&restaurant) {
        return Err(BackendError::not_allowed(format!(
            "Restaurant {} is already in group {}!",
            restaurant, id
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO group_restaurants (group_id, restaurant, position)
        VALUES ($1, $2, (SELECT COALESCE(MAX(position), -1) + 1 FROM group_restaurants WHERE group_id = $1))
        "#,
    )
    .bind(id)
    .bind(restaurant)
    .execute(pool)
    .await?;

    touch(pool, id).await
}

/// # Errors
/// `NotFound` when the restaurant is not listed
pub async fn remove_restaurant(pool: &SqlitePool, id: Uuid, restaurant: Uuid) -> BackendResult<()> {
    get_group(pool, id).await?;

    let result = sqlx::query("DELETE FROM group_restaurants WHERE group_id = $1 AND restaurant = $2")
        .bind(id)
        .bind(restaurant)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(BackendError::not_found(format!(
            "Restaurant {} is not in group {}!",
            restaurant, id
        )));
    }

    touch(pool, id).await
}

/// Drop `restaurant` from every group, returning how many groups listed it
pub async fn remove_restaurant_everywhere(conn: &mut SqliteConnection, restaurant: Uuid) -> BackendResult<u64> {
    let result = sqlx::query("DELETE FROM group_restaurants WHERE restaurant = $1")
        .bind(restaurant)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_group(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM group_restaurants WHERE group_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM restaurant_groups WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn assert_owner_is_user(pool: &SqlitePool, id: Uuid, user: Uuid) -> BackendResult<()> {
    let group = get_group(pool, id).await?;
    if group.owner != user {
        return Err(BackendError::not_allowed(format!(
            "{} is not the owner of group {}!",
            user, id
        )));
    }
    Ok(())
}
