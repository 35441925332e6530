//! OpenAI chat-completions gateway
//!
//! Implements the `LlmGateway` port over the OpenAI chat completions API
//! using reqwest HTTP transport. Also works with any OpenAI-compatible API
//! via the configured `base_url`.
//!
//! - Endpoint: `POST {base_url}/chat/completions`
//! - Auth: `Authorization: Bearer {api_key}`
//! - Body: `{ model, messages, temperature, response_format? }`
//! - Response: `{ choices: [{ message: { content } }] }`

use crate::config::ModelConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use vantage_application::{CompletionRequest, GatewayError, LlmGateway};

/// Request timeout; a hung model call must not stall a whole batch forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatPayload {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Chat-completions adapter for the `LlmGateway` port
#[derive(Debug)]
pub struct OpenAiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiGateway {
    pub fn new(api_key: impl Into<String>, config: &ModelConfig) -> Result<Self, GatewayError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GatewayError::MissingCredential);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            model: config.name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn payload(&self, request: &CompletionRequest) -> ChatPayload {
        ChatPayload {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user.clone(),
                },
            ],
            temperature: request.temperature,
            response_format: request
                .json_object
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = self.payload(&request);
        debug!(model = %self.model, url = %url, "sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(GatewayError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::Parse("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiGateway {
        OpenAiGateway::new("sk-test", &ModelConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = OpenAiGateway::new("", &ModelConfig::default()).unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));
    }

    #[test]
    fn test_payload_shape() {
        let payload = gateway().payload(&CompletionRequest {
            system: "You are Socrates.".to_string(),
            user: "React to this.".to_string(),
            temperature: 0.8,
            json_object: true,
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "React to this.");
        assert!((json["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_payload_omits_response_format_when_plain() {
        let payload = gateway().payload(&CompletionRequest {
            system: "s".to_string(),
            user: "u".to_string(),
            temperature: 0.8,
            json_object: false,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let config = ModelConfig {
            base_url: "https://api.openai.com/v1/".to_string(),
            ..ModelConfig::default()
        };
        let gateway = OpenAiGateway::new("sk-test", &config).unwrap();
        assert_eq!(gateway.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.error.unwrap().message.unwrap(),
            "Rate limit reached"
        );
    }
}
