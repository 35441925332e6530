//! HTTP API
//!
//! Route layout:
//! - `GET  /healthz` liveness
//! - `GET/POST /api/articles`, `GET/PUT/DELETE /api/articles/{slug}`
//! - `GET/POST /api/personas`, `GET/PUT/DELETE /api/personas/{slug}`
//! - `POST /api/perspectives` batch generation, `GET /api/perspectives`
//!
//! Writes require the admin bearer token; the guard runs before any store
//! access so an unauthorized request never touches the database.

pub mod articles;
pub mod auth;
pub mod error;
pub mod personas;
pub mod perspectives;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use vantage_application::{
    ArticleRepository, GeneratePerspectivesUseCase, PersonaRepository, PerspectiveRepository,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleRepository>,
    pub personas: Arc<dyn PersonaRepository>,
    pub perspectives: Arc<dyn PerspectiveRepository>,
    pub generate: Arc<GeneratePerspectivesUseCase>,
    /// Bearer token for admin writes; `None` disables all writes.
    pub admin_token: Option<String>,
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/articles",
            get(articles::list).post(articles::create),
        )
        .route(
            "/api/articles/{slug}",
            get(articles::detail)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route(
            "/api/personas",
            get(personas::list).post(personas::create),
        )
        .route(
            "/api/personas/{slug}",
            get(personas::detail)
                .put(personas::update)
                .delete(personas::delete),
        )
        .route(
            "/api/perspectives",
            post(perspectives::generate).get(perspectives::list),
        )
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
