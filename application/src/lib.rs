//! Application layer for vantage
//!
//! Use cases and ports. Infrastructure adapters implement the port traits;
//! the presentation layer drives the use cases.

pub mod generator;
pub mod ports;
pub mod use_cases;

pub use generator::{GenerationMode, PerspectiveGenerator};
pub use ports::{
    ArticleFilter, ArticleRepository, CompletionRequest, GatewayError, LlmGateway,
    PersonaRepository, PerspectiveRepository, StoreError,
};
pub use use_cases::generate_perspectives::{
    GenerateBatchError, GenerateBatchInput, GeneratePerspectivesUseCase,
};
