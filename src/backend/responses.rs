//! Outward response shapes
//!
//! Stored records reference users by id. Before a record leaves the
//! server every user id in it is replaced by that user's username, and
//! ownership errors get the same treatment through [`named`].

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::friending::{FriendRequest, FriendRequestStatus};
use crate::backend::grouping::Group;
use crate::backend::posting::{Post, PostOptions};
use crate::backend::restaurants::Restaurant;
use crate::backend::reviewing::Review;
use crate::backend::weighting::Weighting;
use crate::shared::{ReviewScores, Weights};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub options: PostOptions,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub creator: String,
    pub name: String,
    pub address: String,
    pub url: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub reviewer: String,
    pub restaurant: Uuid,
    pub comment: String,
    #[serde(flatten)]
    pub scores: ReviewScores,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightingResponse {
    pub id: Uuid,
    pub user: String,
    #[serde(flatten)]
    pub weights: Weights,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupResponse {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub restaurants: Vec<Uuid>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub status: FriendRequestStatus,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

async fn with_usernames<T, R>(
    pool: &SqlitePool,
    items: Vec<T>,
    user_of: impl Fn(&T) -> Uuid,
    build: impl Fn(T, String) -> R,
) -> BackendResult<Vec<R>> {
    let ids: Vec<Uuid> = items.iter().map(&user_of).collect();
    let names = users::ids_to_usernames(pool, &ids).await?;
    Ok(items.into_iter().zip(names).map(|(item, name)| build(item, name)).collect())
}

fn single<R>(mut items: Vec<R>) -> BackendResult<R> {
    items
        .pop()
        .ok_or_else(|| BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Empty response"))
}

fn post_response(post: Post, author: String) -> PostResponse {
    PostResponse {
        options: post.options(),
        id: post.id,
        author,
        content: post.content,
        date_created: post.date_created,
        date_updated: post.date_updated,
    }
}

pub async fn posts(pool: &SqlitePool, posts: Vec<Post>) -> BackendResult<Vec<PostResponse>> {
    with_usernames(pool, posts, |p| p.author, post_response).await
}

pub async fn post(pool: &SqlitePool, post: Post) -> BackendResult<PostResponse> {
    single(posts(pool, vec![post]).await?)
}

fn restaurant_response(r: Restaurant, creator: String) -> RestaurantResponse {
    RestaurantResponse {
        id: r.id,
        creator,
        name: r.name,
        address: r.address,
        url: r.url,
        date_created: r.date_created,
        date_updated: r.date_updated,
    }
}

pub async fn restaurants(pool: &SqlitePool, restaurants: Vec<Restaurant>) -> BackendResult<Vec<RestaurantResponse>> {
    with_usernames(pool, restaurants, |r| r.creator, restaurant_response).await
}

pub async fn restaurant(pool: &SqlitePool, restaurant: Restaurant) -> BackendResult<RestaurantResponse> {
    single(restaurants(pool, vec![restaurant]).await?)
}

fn review_response(review: Review, reviewer: String) -> ReviewResponse {
    ReviewResponse {
        scores: review.scores(),
        id: review.id,
        reviewer,
        restaurant: review.restaurant,
        comment: review.comment,
        date_created: review.date_created,
        date_updated: review.date_updated,
    }
}

pub async fn reviews(pool: &SqlitePool, reviews: Vec<Review>) -> BackendResult<Vec<ReviewResponse>> {
    with_usernames(pool, reviews, |r| r.reviewer, review_response).await
}

pub async fn review(pool: &SqlitePool, review: Review) -> BackendResult<ReviewResponse> {
    single(reviews(pool, vec![review]).await?)
}

fn weighting_response(w: Weighting, user: String) -> WeightingResponse {
    WeightingResponse {
        weights: w.weights(),
        id: w.id,
        user,
        date_created: w.date_created,
        date_updated: w.date_updated,
    }
}

pub async fn weightings(pool: &SqlitePool, weightings: Vec<Weighting>) -> BackendResult<Vec<WeightingResponse>> {
    with_usernames(pool, weightings, |w| w.user_id, weighting_response).await
}

pub async fn weighting(pool: &SqlitePool, weighting: Weighting) -> BackendResult<WeightingResponse> {
    single(weightings(pool, vec![weighting]).await?)
}

fn group_response(group: Group, owner: String) -> GroupResponse {
    GroupResponse {
        id: group.id,
        owner,
        name: group.name,
        restaurants: group.restaurants,
        date_created: group.date_created,
        date_updated: group.date_updated,
    }
}

pub async fn groups(pool: &SqlitePool, groups: Vec<Group>) -> BackendResult<Vec<GroupResponse>> {
    with_usernames(pool, groups, |g| g.owner, group_response).await
}

pub async fn group(pool: &SqlitePool, group: Group) -> BackendResult<GroupResponse> {
    single(groups(pool, vec![group]).await?)
}

/// Friend requests name two users, so both ends are translated
pub async fn friend_requests(
    pool: &SqlitePool,
    requests: Vec<FriendRequest>,
) -> BackendResult<Vec<FriendRequestResponse>> {
    let ids: Vec<Uuid> = requests.iter().flat_map(|r| [r.from_user, r.to_user]).collect();
    let names = users::ids_to_usernames(pool, &ids).await?;

    Ok(requests
        .into_iter()
        .zip(names.chunks(2))
        .map(|(r, pair)| FriendRequestResponse {
            id: r.id,
            from: pair[0].clone(),
            to: pair[1].clone(),
            status: r.status,
            date_created: r.date_created,
            date_updated: r.date_updated,
        })
        .collect())
}

/// Replace the user ids in a failed result's message with usernames
///
/// Only `NotAllowed` and `NotFound` messages mention users; everything
/// else passes through untouched.
pub async fn named<T>(pool: &SqlitePool, result: BackendResult<T>, ids: &[Uuid]) -> BackendResult<T> {
    let err = match result {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let names = match users::ids_to_usernames(pool, ids).await {
        Ok(names) => names,
        Err(lookup) => {
            tracing::warn!("Could not name users in error: {}", lookup);
            return Err(err);
        }
    };
    let rename = |message: String| {
        ids.iter()
            .zip(&names)
            .fold(message, |m, (id, name)| m.replace(&id.to_string(), name))
    };

    Err(match err {
        BackendError::NotAllowed { message } => BackendError::NotAllowed { message: rename(message) },
        BackendError::NotFound { message } => BackendError::NotFound { message: rename(message) },
        other => other,
    })
}
