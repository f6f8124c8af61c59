//! Posting HTTP Handlers
//!
//! - `GET /api/posts?author=` - every post, or one author's, newest first
//! - `POST /api/posts` - write a post
//! - `PATCH /api/posts/{id}` - edit your own post
//! - `DELETE /api/posts/{id}` - delete your own post

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::db::{self, PostOptions};
use crate::backend::auth::users;
use crate::backend::doc::{parse_id, Msg};
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody, QueryParams};
use crate::backend::responses::{self, PostResponse};
use crate::backend::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub options: Option<PostOptions>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub options: Option<PostOptions>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePostResponse {
    pub msg: String,
    pub post: PostResponse,
}

pub async fn get_posts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostsQuery>,
) -> BackendResult<Json<Vec<PostResponse>>> {
    let posts = match query.author.as_deref().filter(|a| !a.is_empty()) {
        Some(author) => {
            let author = users::get_user_by_username(&state.db_pool, author).await?;
            db::get_posts_by_author(&state.db_pool, author.id).await?
        }
        None => db::get_posts(&state.db_pool).await?,
    };

    Ok(Json(responses::posts(&state.db_pool, posts).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> BackendResult<Json<CreatePostResponse>> {
    let post = db::create_post(
        &state.db_pool,
        user.user_id(),
        &request.content,
        request.options.as_ref(),
    )
    .await?;
    tracing::info!("Post {} created by {}", post.id, user.user_id());

    Ok(Json(CreatePostResponse {
        msg: "Post successfully created!".to_string(),
        post: responses::post(&state.db_pool, post).await?,
    }))
}

pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_author_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::update_post(pool, id, request.content.as_deref(), request.options.as_ref()).await?;
    Ok(Json(Msg::new("Post successfully updated!")))
}

pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_author_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::delete_post(pool, id).await?;
    Ok(Json(Msg::new("Post deleted successfully!")))
}
