//! Perspective endpoints
//!
//! `POST /api/perspectives` is the admin batch-generation entry point. The
//! guard runs before the use case, so an unauthorized call performs no
//! generation and no store writes.

use super::auth::require_admin;
use super::error::ApiError;
use super::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use vantage_application::GenerateBatchInput;
use vantage_domain::Perspective;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub article_id: String,
    pub persona_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub article_id: String,
}

pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Vec<Perspective>>, ApiError> {
    require_admin(&state, &headers)?;

    let results = state
        .generate
        .execute(GenerateBatchInput {
            article_id: payload.article_id,
            persona_ids: payload.persona_ids,
        })
        .await?;
    info!(count = results.len(), "perspective batch completed");
    Ok(Json(results))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Perspective>>, ApiError> {
    Ok(Json(
        state.perspectives.list_for_article(&query.article_id).await?,
    ))
}
