//! Database operations for friendships and friend requests
//!
//! A friendship is unordered: `(user1, user2)` and `(user2, user1)` name
//! the same pair. A request is directed from `from_user` to `to_user`;
//! only one pending request may exist per pair, in either direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendRequest {
    pub id: Uuid,
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub status: FriendRequestStatus,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub user1: Uuid,
    pub user2: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Friendship {
    /// The member of the pair that is not `user`
    pub fn other(&self, user: Uuid) -> Uuid {
        if self.user1 == user {
            self.user2
        } else {
            self.user1
        }
    }
}

const REQUEST_COLUMNS: &str = "id, from_user, to_user, status, date_created, date_updated";

/// Send a friend request
///
/// # Errors
/// * `NotAllowed` - sending to yourself, already friends, or a pending
///   request exists between the two users
pub async fn send_request(pool: &SqlitePool, from: Uuid, to: Uuid) -> BackendResult<FriendRequest> {
    if from == to {
        return Err(BackendError::not_allowed("Cannot send a friend request to yourself!"));
    }
    assert_not_friends(pool, from, to).await?;
    assert_no_pending_request(pool, from, to).await?;

    let created = now();
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        INSERT INTO friend_requests (id, from_user, to_user, status, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(new_id())
    .bind(from)
    .bind(to)
    .bind(FriendRequestStatus::Pending)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => pending_exists(from, to),
        e => e.into(),
    })?;

    Ok(request)
}

/// Accept the pending request `from -> to` and record the friendship
///
/// The status flip is conditional on the request still being pending, so
/// of two concurrent accepts only one creates the friendship.
pub async fn accept_request(pool: &SqlitePool, from: Uuid, to: Uuid) -> BackendResult<()> {
    let updated = now();

    let mut tx = pool.begin().await?;
    let accepted = sqlx::query(
        r#"
        UPDATE friend_requests SET status = $1, date_updated = $2
        WHERE from_user = $3 AND to_user = $4 AND status = $5
        "#,
    )
    .bind(FriendRequestStatus::Accepted)
    .bind(updated)
    .bind(from)
    .bind(to)
    .bind(FriendRequestStatus::Pending)
    .execute(&mut *tx)
    .await?;

    if accepted.rows_affected() == 0 {
        return Err(request_missing(from, to));
    }

    sqlx::query(
        r#"
        INSERT INTO friendships (id, user1, user2, date_created, date_updated)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(new_id())
    .bind(from)
    .bind(to)
    .bind(updated)
    .bind(updated)
    .execute(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => already_friends(from, to),
        e => e.into(),
    })?;
    tx.commit().await?;

    tracing::info!("Friend request from {} to {} accepted", from, to);
    Ok(())
}

/// Reject the pending request `from -> to`
pub async fn reject_request(pool: &SqlitePool, from: Uuid, to: Uuid) -> BackendResult<()> {
    let request = get_pending_request(pool, from, to).await?;

    sqlx::query("UPDATE friend_requests SET status = $1, date_updated = $2 WHERE id = $3")
        .bind(FriendRequestStatus::Rejected)
        .bind(now())
        .bind(request.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Withdraw the pending request `from -> to`
pub async fn remove_request(pool: &SqlitePool, from: Uuid, to: Uuid) -> BackendResult<()> {
    let request = get_pending_request(pool, from, to).await?;

    sqlx::query("DELETE FROM friend_requests WHERE id = $1")
        .bind(request.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// End the friendship between `user` and `friend`
pub async fn remove_friend(pool: &SqlitePool, user: Uuid, friend: Uuid) -> BackendResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM friendships
        WHERE (user1 = $1 AND user2 = $2) OR (user1 = $2 AND user2 = $1)
        "#,
    )
    .bind(user)
    .bind(friend)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found(format!(
            "Friendship between {} and {} does not exist!",
            user, friend
        )));
    }
    Ok(())
}

/// Every request `user` sent or received, newest first
pub async fn get_requests(pool: &SqlitePool, user: Uuid) -> BackendResult<Vec<FriendRequest>> {
    let requests = sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS} FROM friend_requests
        WHERE from_user = $1 OR to_user = $1
        ORDER BY date_created DESC, rowid DESC
        "#
    ))
    .bind(user)
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

/// Ids of everyone `user` is friends with
pub async fn get_friends(pool: &SqlitePool, user: Uuid) -> BackendResult<Vec<Uuid>> {
    let friendships = sqlx::query_as::<_, Friendship>(
        r#"
        SELECT id, user1, user2, date_created, date_updated FROM friendships
        WHERE user1 = $1 OR user2 = $1
        ORDER BY date_created, rowid
        "#,
    )
    .bind(user)
    .fetch_all(pool)
    .await?;

    Ok(friendships.iter().map(|f| f.other(user)).collect())
}

pub async fn are_friends(pool: &SqlitePool, a: Uuid, b: Uuid) -> BackendResult<bool> {
    let found: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM friendships
        WHERE (user1 = $1 AND user2 = $2) OR (user1 = $2 AND user2 = $1)
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

async fn get_pending_request(pool: &SqlitePool, from: Uuid, to: Uuid) -> BackendResult<FriendRequest> {
    sqlx::query_as::<_, FriendRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS} FROM friend_requests
        WHERE from_user = $1 AND to_user = $2 AND status = $3
        "#
    ))
    .bind(from)
    .bind(to)
    .bind(FriendRequestStatus::Pending)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| request_missing(from, to))
}

fn request_missing(from: Uuid, to: Uuid) -> BackendError {
    BackendError::not_found(format!("Friend request from {} to {} does not exist!", from, to))
}

fn already_friends(a: Uuid, b: Uuid) -> BackendError {
    BackendError::not_allowed(format!("{} and {} are already friends!", a, b))
}

fn pending_exists(a: Uuid, b: Uuid) -> BackendError {
    BackendError::not_allowed(format!("Friend request between {} and {} already exists!", a, b))
}

async fn assert_not_friends(pool: &SqlitePool, a: Uuid, b: Uuid) -> BackendResult<()> {
    if are_friends(pool, a, b).await? {
        return Err(already_friends(a, b));
    }
    Ok(())
}

async fn assert_no_pending_request(pool: &SqlitePool, a: Uuid, b: Uuid) -> BackendResult<()> {
    let found: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM friend_requests
        WHERE ((from_user = $1 AND to_user = $2) OR (from_user = $2 AND to_user = $1))
          AND status = $3
        "#,
    )
    .bind(a)
    .bind(b)
    .bind(FriendRequestStatus::Pending)
    .fetch_optional(pool)
    .await?;

    if found.is_some() {
        return Err(pending_exists(a, b));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_memory;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_request_accept_unfriend() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());

        let request = send_request(&pool, a, b).await.unwrap();
        assert_eq!(request.status, FriendRequestStatus::Pending);
        assert!(!are_friends(&pool, a, b).await.unwrap());

        accept_request(&pool, a, b).await.unwrap();
        assert!(are_friends(&pool, b, a).await.unwrap());
        assert_eq!(get_friends(&pool, a).await.unwrap(), vec![b]);
        assert_eq!(get_friends(&pool, b).await.unwrap(), vec![a]);

        let requests = get_requests(&pool, b).await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].status, FriendRequestStatus::Accepted);

        remove_friend(&pool, b, a).await.unwrap();
        assert!(get_friends(&pool, a).await.unwrap().is_empty());

        let err = remove_friend(&pool, a, b).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_send_request_guards() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());

        let own = send_request(&pool, a, a).await.unwrap_err();
        assert_eq!(own.status_code(), StatusCode::FORBIDDEN);

        send_request(&pool, a, b).await.unwrap();
        let reverse = send_request(&pool, b, a).await.unwrap_err();
        assert_eq!(reverse.message(), format!("Friend request between {} and {} already exists!", b, a));

        accept_request(&pool, a, b).await.unwrap();
        let already = send_request(&pool, b, a).await.unwrap_err();
        assert_eq!(already.message(), format!("{} and {} are already friends!", b, a));
    }

    #[tokio::test]
    async fn test_reject_and_remove() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());

        let missing = accept_request(&pool, a, b).await.unwrap_err();
        assert_eq!(missing.message(), format!("Friend request from {} to {} does not exist!", a, b));

        send_request(&pool, a, b).await.unwrap();
        reject_request(&pool, a, b).await.unwrap();
        assert!(!are_friends(&pool, a, b).await.unwrap());
        assert!(reject_request(&pool, a, b).await.is_err());

        // a rejected request does not block a new one
        send_request(&pool, a, b).await.unwrap();
        remove_request(&pool, a, b).await.unwrap();
        assert_eq!(get_requests(&pool, a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_accepts_befriend_once() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());
        send_request(&pool, a, b).await.unwrap();

        let (first, second) = tokio::join!(accept_request(&pool, a, b), accept_request(&pool, a, b));
        assert!(first.is_ok() != second.is_ok());

        let err = first.err().or(second.err()).unwrap();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(get_friends(&pool, a).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_concurrent_sends_leave_one_pending() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());

        let (first, second) = tokio::join!(send_request(&pool, a, b), send_request(&pool, b, a));
        assert!(first.is_ok() != second.is_ok());

        let err = first.err().or(second.err()).unwrap();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(get_requests(&pool, a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_friendship_pair_is_unique() {
        let pool = connect_memory().await;
        let (a, b) = (new_id(), new_id());
        send_request(&pool, a, b).await.unwrap();
        accept_request(&pool, a, b).await.unwrap();

        let duplicate = sqlx::query(
            "INSERT INTO friendships (id, user1, user2, date_created, date_updated) VALUES ($1, $2, $3, $4, $4)",
        )
        .bind(new_id())
        .bind(b)
        .bind(a)
        .bind(now())
        .execute(&pool)
        .await;
        assert!(duplicate.is_err());
    }
}
