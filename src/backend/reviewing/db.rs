//! Database operations for reviews

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{ReviewScores, ReviewScoresPatch};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub reviewer: Uuid,
    pub restaurant: Uuid,
    pub comment: String,
    pub food: i64,
    pub ambience: i64,
    pub service: i64,
    pub price: i64,
    pub novelty: i64,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Review {
    pub fn scores(&self) -> ReviewScores {
        ReviewScores {
            food: self.food,
            ambience: self.ambience,
            service: self.service,
            price: self.price,
            novelty: self.novelty,
        }
    }
}

/// Narrow a listing to one reviewer, one restaurant, or both
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFilter {
    pub reviewer: Option<Uuid>,
    pub restaurant: Option<Uuid>,
}

const REVIEW_COLUMNS: &str = "id, reviewer, restaurant, comment, food, ambience, service, price, novelty, date_created, date_updated";

/// Create a review
///
/// The caller checks that the restaurant exists.
///
/// # Errors
/// * `BadValues` - a score outside 1..=5
/// * `NotAllowed` - `reviewer` already reviewed `restaurant`
pub async fn create_review(
    pool: &SqlitePool,
    reviewer: Uuid,
    restaurant: Uuid,
    comment: &str,
    scores: &ReviewScores,
) -> BackendResult<Review> {
    scores.validate()?;

    let existing = get_reviews(
        pool,
        ReviewFilter {
            reviewer: Some(reviewer),
            restaurant: Some(restaurant),
        },
    )
    .await?;
    if !existing.is_empty() {
        return Err(BackendError::not_allowed(format!(
            "{} has already reviewed restaurant {}!",
            reviewer, restaurant
        )));
    }

    let created = now();
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
        INSERT INTO reviews (id, reviewer, restaurant, comment, food, ambience, service, price, novelty, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(reviewer)
    .bind(restaurant)
    .bind(comment)
    .bind(scores.food)
    .bind(scores.ambience)
    .bind(scores.service)
    .bind(scores.price)
    .bind(scores.novelty)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

/// Reviews matching `filter`, newest first
pub async fn get_reviews(pool: &SqlitePool, filter: ReviewFilter) -> BackendResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        r#"
        SELECT {REVIEW_COLUMNS} FROM reviews
        WHERE ($1 IS NULL OR reviewer = $1) AND ($2 IS NULL OR restaurant = $2)
        ORDER BY date_created DESC, rowid DESC
        "#
    ))
    .bind(filter.reviewer)
    .bind(filter.restaurant)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn get_review(pool: &SqlitePool, id: Uuid) -> BackendResult<Review> {
    sqlx::query_as::<_, Review>(&format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Review {} does not exist!", id)))
}

/// Partial update; scores are validated after the patch is applied
pub async fn update_review(
    pool: &SqlitePool,
    id: Uuid,
    comment: Option<&str>,
    patch: &ReviewScoresPatch,
) -> BackendResult<()> {
    let review = get_review(pool, id).await?;
    let scores = review.scores().apply(patch);
    scores.validate()?;

    sqlx::query(
        r#"
        UPDATE reviews
        SET comment = $1, food = $2, ambience = $3, service = $4, price = $5, novelty = $6, date_updated = $7
        WHERE id = $8
        "#,
    )
    .bind(comment.unwrap_or(&review.comment))
    .bind(scores.food)
    .bind(scores.ambience)
    .bind(scores.service)
    .bind(scores.price)
    .bind(scores.novelty)
    .bind(now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_review(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every review of `restaurant`, returning how many went
/// Drop every review of `restaurant`, on the caller's connection so it
/// can share a transaction with the restaurant's own deletion
pub async fn delete_by_restaurant(conn: &mut SqliteConnection, restaurant: Uuid) -> BackendResult<u64> {
    let result = sqlx::query("DELETE FROM reviews WHERE restaurant = $1")
        .bind(restaurant)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn assert_reviewer_is_user(pool: &SqlitePool, id: Uuid, user: Uuid) -> BackendResult<()> {
    let review = get_review(pool, id).await?;
    if review.reviewer != user {
        return Err(BackendError::not_allowed(format!(
            "{} is not the reviewer of review {}!",
            user, id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_memory;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn scores(n: i64) -> ReviewScores {
        ReviewScores {
            food: n,
            ambience: n,
            service: n,
            price: n,
            novelty: n,
        }
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let pool = connect_memory().await;
        let (alice, bob) = (new_id(), new_id());
        let (r1, r2) = (new_id(), new_id());

        create_review(&pool, alice, r1, "good", &scores(4)).await.unwrap();
        create_review(&pool, alice, r2, "fine", &scores(3)).await.unwrap();
        create_review(&pool, bob, r1, "great", &scores(5)).await.unwrap();

        assert_eq!(get_reviews(&pool, ReviewFilter::default()).await.unwrap().len(), 3);

        let by_alice = ReviewFilter { reviewer: Some(alice), restaurant: None };
        assert_eq!(get_reviews(&pool, by_alice).await.unwrap().len(), 2);

        let for_r1 = ReviewFilter { reviewer: None, restaurant: Some(r1) };
        assert_eq!(get_reviews(&pool, for_r1).await.unwrap().len(), 2);

        let both = ReviewFilter { reviewer: Some(bob), restaurant: Some(r1) };
        let found = get_reviews(&pool, both).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].comment, "great");

        assert_eq!(delete_by_restaurant(&mut *pool.acquire().await.unwrap(), r1).await.unwrap(), 2);
        assert_eq!(get_reviews(&pool, ReviewFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_one_review_per_restaurant() {
        let pool = connect_memory().await;
        let (user, restaurant) = (new_id(), new_id());

        create_review(&pool, user, restaurant, "", &scores(2)).await.unwrap();
        let err = create_review(&pool, user, restaurant, "again", &scores(2)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_scores_validated() {
        let pool = connect_memory().await;
        let err = create_review(&pool, new_id(), new_id(), "", &scores(6)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let review = create_review(&pool, new_id(), new_id(), "ok", &scores(3)).await.unwrap();
        let bad = ReviewScoresPatch { price: Some(0), ..Default::default() };
        assert!(update_review(&pool, review.id, None, &bad).await.is_err());

        let good = ReviewScoresPatch { price: Some(1), ..Default::default() };
        update_review(&pool, review.id, Some("pricey"), &good).await.unwrap();
        let updated = get_review(&pool, review.id).await.unwrap();
        assert_eq!(updated.comment, "pricey");
        assert_eq!(updated.scores(), ReviewScores { price: 1, ..scores(3) });
    }

    #[tokio::test]
    async fn test_assert_reviewer_is_user() {
        let pool = connect_memory().await;
        let user = new_id();
        let review = create_review(&pool, user, new_id(), "", &scores(1)).await.unwrap();

        assert!(assert_reviewer_is_user(&pool, review.id, user).await.is_ok());
        let err = assert_reviewer_is_user(&pool, review.id, new_id()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        delete_review(&pool, review.id).await.unwrap();
        let err = get_review(&pool, review.id).await.unwrap_err();
        assert_eq!(err.message(), format!("Review {} does not exist!", review.id));
    }
}
