//! Reviewing HTTP Handlers
//!
//! - `GET /api/reviews?reviewer=&restaurant=` - `reviewer` is a username,
//!   `restaurant` a restaurant id; either, both or neither may be given
//! - `POST /api/reviews`
//! - `PATCH /api/reviews/{id}` / `DELETE /api/reviews/{id}` - reviewer only

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::db::{self, ReviewFilter};
use crate::backend::auth::users;
use crate::backend::doc::{parse_id, Msg};
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody, QueryParams};
use crate::backend::responses::{self, ReviewResponse};
use crate::backend::restaurants;
use crate::backend::server::state::AppState;
use crate::shared::{ReviewScores, ReviewScoresPatch};

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    pub reviewer: Option<String>,
    pub restaurant: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateReviewRequest {
    pub restaurant: String,
    #[serde(default)]
    pub comment: String,
    #[serde(flatten)]
    pub scores: ReviewScores,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateReviewRequest {
    pub comment: Option<String>,
    #[serde(flatten)]
    pub scores: ReviewScoresPatch,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateReviewResponse {
    pub msg: String,
    pub review: ReviewResponse,
}

pub async fn get_reviews(
    State(pool): State<SqlitePool>,
    QueryParams(query): QueryParams<ReviewsQuery>,
) -> BackendResult<Json<Vec<ReviewResponse>>> {
    let mut filter = ReviewFilter::default();

    if let Some(reviewer) = query.reviewer.as_deref().filter(|r| !r.is_empty()) {
        filter.reviewer = Some(users::get_user_by_username(&pool, reviewer).await?.id);
    }
    if let Some(restaurant) = query.restaurant.as_deref().filter(|r| !r.is_empty()) {
        filter.restaurant = Some(parse_id(restaurant)?);
    }

    let reviews = db::get_reviews(&pool, filter).await?;
    Ok(Json(responses::reviews(&pool, reviews).await?))
}

pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateReviewRequest>,
) -> BackendResult<Json<CreateReviewResponse>> {
    let pool = &state.db_pool;
    let restaurant = parse_id(&request.restaurant)?;
    restaurants::db::assert_exists(pool, restaurant).await?;

    let created = db::create_review(pool, user.user_id(), restaurant, &request.comment, &request.scores).await;
    let review = responses::named(pool, created, &[user.user_id()]).await?;
    tracing::info!("Review {} created for restaurant {}", review.id, restaurant);

    Ok(Json(CreateReviewResponse {
        msg: "Review successfully created!".to_string(),
        review: responses::review(pool, review).await?,
    }))
}

pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateReviewRequest>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_reviewer_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::update_review(pool, id, request.comment.as_deref(), &request.scores).await?;
    Ok(Json(Msg::new("Review successfully updated!")))
}

pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_reviewer_is_user(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::delete_review(pool, id).await?;
    Ok(Json(Msg::new("Review deleted successfully!")))
}
