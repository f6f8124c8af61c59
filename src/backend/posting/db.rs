//! Database operations for posts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::error::require_non_empty;

/// Display options attached to a post
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostOptions {
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author: Uuid,
    pub content: String,
    pub background_color: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Post {
    pub fn options(&self) -> PostOptions {
        PostOptions {
            background_color: self.background_color.clone(),
        }
    }
}

const POST_COLUMNS: &str = "id, author, content, background_color, date_created, date_updated";

/// Create a new post
pub async fn create_post(
    pool: &SqlitePool,
    author: Uuid,
    content: &str,
    options: Option<&PostOptions>,
) -> BackendResult<Post> {
    require_non_empty("content", content)?;
    let created = now();

    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        INSERT INTO posts (id, author, content, background_color, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(author)
    .bind(content)
    .bind(options.and_then(|o| o.background_color.as_deref()))
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// All posts, newest first
pub async fn get_posts(pool: &SqlitePool) -> BackendResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY date_created DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

/// Posts written by `author`, newest first
pub async fn get_posts_by_author(pool: &SqlitePool, author: Uuid) -> BackendResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE author = $1 ORDER BY date_created DESC, rowid DESC"
    ))
    .bind(author)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn get_post(pool: &SqlitePool, id: Uuid) -> BackendResult<Post> {
    sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Post {} does not exist!", id)))
}

/// Partial update; absent fields keep their value
pub async fn update_post(
    pool: &SqlitePool,
    id: Uuid,
    content: Option<&str>,
    options: Option<&PostOptions>,
) -> BackendResult<()> {
    let post = get_post(pool, id).await?;
    if let Some(content) = content {
        require_non_empty("content", content)?;
    }

    let background_color = match options {
        Some(options) => options.background_color.clone(),
        None => post.background_color,
    };

    sqlx::query(
        "UPDATE posts SET content = $1, background_color = $2, date_updated = $3 WHERE id = $4",
    )
    .bind(content.unwrap_or(&post.content))
    .bind(background_color)
    .bind(now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// # Errors
/// * `NotFound` - no such post
/// * `NotAllowed` - `user` did not write it
pub async fn assert_author_is_user(pool: &SqlitePool, id: Uuid, user: Uuid) -> BackendResult<()> {
    let post = get_post(pool, id).await?;
    if post.author != user {
        return Err(BackendError::not_allowed(format!(
            "{} is not the author of post {}!",
            user, id
        )));
    }
    Ok(())
}
