//! Persona endpoints

use super::auth::require_admin;
use super::error::ApiError;
use super::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vantage_application::StoreError;
use vantage_domain::{Persona, PersonaCategory, PersonaUpdate, Perspective, Slug};

/// Recent perspectives shown on a persona page
const RECENT_PERSPECTIVES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Serialize)]
pub struct PersonaDetail {
    #[serde(flatten)]
    pub persona: Persona,
    pub perspectives: Vec<Perspective>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePersona {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub traits: Vec<String>,
    pub speaking_style: String,
    pub expertise: String,
    #[serde(default)]
    pub quirks: Vec<String>,
    pub category: PersonaCategory,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Persona>>, ApiError> {
    Ok(Json(state.personas.list(query.include_inactive).await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PersonaDetail>, ApiError> {
    let persona = state
        .personas
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("persona".to_string()))?;
    let perspectives = state
        .perspectives
        .list_for_persona(&persona.id, RECENT_PERSPECTIVES)
        .await?;
    Ok(Json(PersonaDetail {
        persona,
        perspectives,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePersona>,
) -> Result<(StatusCode, Json<Persona>), ApiError> {
    require_admin(&state, &headers)?;

    let slug = Slug::from_text(&payload.name)?;
    let mut persona = Persona::new(
        Uuid::new_v4().to_string(),
        slug,
        payload.name,
        payload.title,
        payload.category,
        Utc::now(),
    )
    .with_description(payload.description)
    .with_traits(payload.traits)
    .with_speaking_style(payload.speaking_style)
    .with_expertise(payload.expertise)
    .with_quirks(payload.quirks);
    if let Some(url) = payload.image_url {
        persona = persona.with_image_url(url);
    }
    persona.validate()?;

    state.personas.insert(&persona).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<PersonaUpdate>,
) -> Result<Json<Persona>, ApiError> {
    require_admin(&state, &headers)?;

    let mut persona = state
        .personas
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("persona".to_string()))?;
    persona.apply_update(payload);
    persona.validate()?;
    state.personas.update(&persona).await?;
    Ok(Json(persona))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_admin(&state, &headers)?;

    match state.personas.delete_by_slug(&slug).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("persona".to_string())),
        Err(e) => Err(e.into()),
    }
}
