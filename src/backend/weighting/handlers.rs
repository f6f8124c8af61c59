//! Weighting HTTP Handlers
//!
//! A user only ever sees and edits their own weighting.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::db;
use crate::backend::doc::{parse_id, Msg};
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody};
use crate::backend::responses::{self, WeightingResponse};
use crate::backend::server::state::AppState;
use crate::shared::{Weights, WeightsPatch};

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateWeightingResponse {
    pub msg: String,
    pub weighting: WeightingResponse,
}

/// `GET /api/weightings` - the caller's weighting, as a list of zero or one
pub async fn get_user_weighting(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<Vec<WeightingResponse>>> {
    let weightings = db::get_user_weighting(&state.db_pool, user.user_id()).await?;
    Ok(Json(responses::weightings(&state.db_pool, weightings).await?))
}

pub async fn create_weighting(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(weights): JsonBody<Weights>,
) -> BackendResult<Json<CreateWeightingResponse>> {
    let pool = &state.db_pool;
    let created = db::create_weighting(pool, user.user_id(), &weights).await;
    let weighting = responses::named(pool, created, &[user.user_id()]).await?;

    Ok(Json(CreateWeightingResponse {
        msg: "Preference successfully created".to_string(),
        weighting: responses::weighting(pool, weighting).await?,
    }))
}

pub async fn update_weighting(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<WeightsPatch>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_user_weighting(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::update_weighting(pool, id, &patch).await?;
    Ok(Json(Msg::new("Weighting successfully updated!")))
}

pub async fn reset_weighting(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<Msg>> {
    let id = parse_id(&id)?;
    let pool = &state.db_pool;
    responses::named(pool, db::assert_user_weighting(pool, id, user.user_id()).await, &[user.user_id()]).await?;

    db::reset_weighting(pool, id).await?;
    Ok(Json(Msg::new("Weighting successfully reset!")))
}
