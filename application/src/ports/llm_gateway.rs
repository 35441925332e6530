//! LLM Gateway port
//!
//! Defines the interface for communicating with the external text-generation
//! model. The single adapter lives in the infrastructure layer; the generator
//! is the only caller.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No model credential configured")]
    MissingCredential,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed model response: {0}")]
    Parse(String),
}

/// A single completion request
///
/// One system instruction, one user instruction, a sampling temperature, and
/// a directive to return a JSON object.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Ask the provider for strictly structured JSON output
    pub json_object: bool,
}

/// Gateway to the external text-generation model
///
/// A single attempt per call; retry and fallback policy belong to callers.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one completion request and return the raw response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
