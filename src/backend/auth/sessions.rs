/**
 * Session Management and JWT Tokens
 *
 * A login session is a row in `sessions`; the client holds a signed JWT
 * naming that row (`sid`) and the user (`sub`). A token is only honoured
 * while its row exists, so logging out or deleting the account revokes it
 * even before `exp`.
 */

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::doc::{new_id, now};
use crate::backend::error::{BackendError, BackendResult};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Stored session row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date_created: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The user behind a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub session_id: Uuid,
    pub user_id: Uuid,
}

/// Signing keys and lifetime for session tokens
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_days: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_days,
        }
    }

    /// When a session created at `created` runs out
    fn expiry(&self, created: DateTime<Utc>) -> BackendResult<DateTime<Utc>> {
        Duration::try_days(self.ttl_days)
            .and_then(|ttl| created.checked_add_signed(ttl))
            .ok_or_else(|| {
                BackendError::handler(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Session lifetime of {} days is out of range", self.ttl_days),
                )
            })
    }

    /// Create a JWT token for a session
    pub fn create_token(
        &self,
        session: &Session,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: session.user_id.to_string(),
            sid: session.id.to_string(),
            exp: session.expires_at.timestamp().max(0) as u64,
            iat: session.date_created.timestamp().max(0) as u64,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

/// Start a session for `user_id` and return its bearer token
pub async fn start(pool: &SqlitePool, keys: &SessionKeys, user_id: Uuid) -> BackendResult<String> {
    let created = now();
    let expires_at = keys.expiry(created)?;
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id, date_created, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, date_created, expires_at
        "#,
    )
    .bind(new_id())
    .bind(user_id)
    .bind(created)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Session {} started for user {}", session.id, user_id);
    Ok(keys.create_token(&session)?)
}

/// End a single session
pub async fn end(pool: &SqlitePool, session_id: Uuid) -> BackendResult<()> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// End every session belonging to a user
pub async fn end_all_for_user(pool: &SqlitePool, user_id: Uuid) -> BackendResult<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Resolve a bearer token to its live session
///
/// Returns `Ok(None)` for tokens that fail verification or whose session
/// row is gone or expired.
pub async fn resolve(
    pool: &SqlitePool,
    keys: &SessionKeys,
    token: &str,
) -> BackendResult<Option<SessionUser>> {
    let claims = match keys.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Invalid token: {:?}", e);
            return Ok(None);
        }
    };

    let (Ok(session_id), Ok(user_id)) = (Uuid::parse_str(&claims.sid), Uuid::parse_str(&claims.sub)) else {
        tracing::warn!("Token carries malformed ids");
        return Ok(None);
    };

    let session = sqlx::query_as::<_, Session>(
        "SELECT id, user_id, date_created, expires_at FROM sessions WHERE id = $1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    match session {
        Some(session) if session.user_id == user_id && session.expires_at > now() => {
            Ok(Some(SessionUser { session_id, user_id }))
        }
        Some(session) if session.expires_at <= now() => {
            end(pool, session.id).await?;
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// The logged-in user, or 401
pub fn get_user(session: Option<SessionUser>) -> BackendResult<SessionUser> {
    session.ok_or_else(|| BackendError::unauthenticated("Must be logged in!"))
}

/// Succeeds only when no session is present
pub fn is_logged_out(session: Option<SessionUser>) -> BackendResult<()> {
    match session {
        Some(_) => Err(BackendError::not_allowed("Must be logged out!")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_memory;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", 30)
    }

    #[test]
    fn test_create_and_verify_token() {
        let keys = keys();
        let created = now();
        let session = Session {
            id: new_id(),
            user_id: new_id(),
            date_created: created,
            expires_at: created + Duration::days(1),
        };

        let token = keys.create_token(&session).unwrap();
        let claims = keys.verify_token(&token).unwrap();
        assert_eq!(claims.sub, session.user_id.to_string());
        assert_eq!(claims.sid, session.id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(keys().verify_token("invalid.token.here").is_err());

        let other = SessionKeys::new("another-secret", 30);
        let created = now();
        let session = Session {
            id: new_id(),
            user_id: new_id(),
            date_created: created,
            expires_at: created + Duration::days(1),
        };
        let token = other.create_token(&session).unwrap();
        assert!(keys().verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_start_resolve_end() {
        let pool = connect_memory().await;
        let keys = keys();
        let user_id = new_id();

        let token = start(&pool, &keys, user_id).await.unwrap();
        let session = resolve(&pool, &keys, &token).await.unwrap().unwrap();
        assert_eq!(session.user_id, user_id);

        end(&pool, session.session_id).await.unwrap();
        assert!(resolve(&pool, &keys, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_end_all_for_user() {
        let pool = connect_memory().await;
        let keys = keys();
        let user_id = new_id();

        let first = start(&pool, &keys, user_id).await.unwrap();
        let second = start(&pool, &keys, user_id).await.unwrap();
        assert_eq!(end_all_for_user(&pool, user_id).await.unwrap(), 2);

        assert!(resolve(&pool, &keys, &first).await.unwrap().is_none());
        assert!(resolve(&pool, &keys, &second).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let pool = connect_memory().await;
        let keys = keys();

        let token = start(&pool, &keys, new_id()).await.unwrap();
        sqlx::query("UPDATE sessions SET expires_at = $1")
            .bind(now() - Duration::hours(1))
            .execute(&pool)
            .await
            .unwrap();

        assert!(resolve(&pool, &keys, &token).await.unwrap().is_none());

        let (left,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 0);
    }

    #[tokio::test]
    async fn test_start_with_out_of_range_lifetime() {
        let pool = connect_memory().await;
        let keys = SessionKeys::new("test-secret", 200_000_000);

        let err = start(&pool, &keys, new_id()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_session_guards() {
        let session = SessionUser { session_id: new_id(), user_id: new_id() };

        assert_eq!(get_user(Some(session)).unwrap(), session);
        assert_eq!(
            get_user(None).unwrap_err().message(),
            "Must be logged in!"
        );
        assert!(is_logged_out(None).is_ok());
        assert_eq!(
            is_logged_out(Some(session)).unwrap_err().message(),
            "Must be logged out!"
        );
    }
}
