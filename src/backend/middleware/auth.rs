/**
 * Authentication Extractors
 *
 * Resolve the `Authorization: Bearer <token>` header into the session it
 * names. Two extractors cover the two kinds of route:
 *
 * - `AuthUser` - the route needs a logged-in caller; rejects with 401
 * - `MaybeSession` - the route behaves differently (or refuses) when a
 *   caller is logged in, e.g. signup and login
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::sessions::{self, SessionUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Extract the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) => Some(token.trim()),
        None => {
            tracing::warn!("Invalid Authorization header format");
            None
        }
    }
}

async fn resolve_session(parts: &Parts, state: &AppState) -> Result<Option<SessionUser>, BackendError> {
    match bearer_token(&parts.headers) {
        Some(token) => sessions::resolve(&state.db_pool, &state.session_keys, token).await,
        None => Ok(None),
    }
}

/// The session attached to the request, if any
#[derive(Clone, Copy, Debug)]
pub struct MaybeSession(pub Option<SessionUser>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(resolve_session(parts, state).await?))
    }
}

/// Axum extractor for a logged-in caller
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub SessionUser);

impl AuthUser {
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = resolve_session(parts, state).await?;
        sessions::get_user(session).map(AuthUser)
    }
}
