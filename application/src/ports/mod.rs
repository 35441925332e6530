//! Ports: interfaces the application layer requires from the outside world
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod article_repository;
pub mod llm_gateway;
pub mod persona_repository;
pub mod perspective_repository;

pub use article_repository::{ArticleFilter, ArticleRepository};
pub use llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
pub use persona_repository::PersonaRepository;
pub use perspective_repository::PerspectiveRepository;

use thiserror::Error;

/// Errors surfaced by repository adapters
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate record")]
    Duplicate,

    #[error("Record not found")]
    NotFound,

    #[error("Storage backend error: {0}")]
    Backend(String),
}
