//! API error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use vantage_application::{GenerateBatchError, StoreError};
use vantage_domain::DomainError;

/// Errors surfaced to API clients
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    Validation(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };
        (status, Json(json!({ "error": { "message": message } }))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound("record".to_string()),
            StoreError::Duplicate => {
                ApiError::Validation("a record with this identity already exists".to_string())
            }
            StoreError::Backend(message) => {
                error!(%message, "storage backend failure");
                ApiError::Internal
            }
        }
    }
}

impl From<GenerateBatchError> for ApiError {
    fn from(e: GenerateBatchError) -> Self {
        match e {
            GenerateBatchError::ArticleNotFound(_) => ApiError::NotFound("article".to_string()),
            GenerateBatchError::Store(inner) => inner.into(),
        }
    }
}
