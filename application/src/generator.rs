//! Perspective Generator
//!
//! Produces one [`PerspectiveDraft`] per (persona, article), either through
//! the live model gateway or the deterministic demo templates. The public
//! contract is infallible: every live-path failure is logged and converted
//! into a well-formed fallback draft so a missing perspective never blocks
//! the rest of a batch.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use vantage_domain::{demo_perspective, Article, Persona, PerspectiveDraft, PerspectivePrompt};

/// Sampling temperature for live generation: varied, in-character phrasing
/// over determinism.
const LIVE_TEMPERATURE: f32 = 0.8;

/// Which content source the generator uses
///
/// Decided once at startup from the configured credential and injected at
/// construction; nothing below this layer reads the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Live,
    Demo,
}

/// Two-mode perspective generator
pub struct PerspectiveGenerator {
    mode: GenerationMode,
    gateway: Option<Arc<dyn LlmGateway>>,
}

impl PerspectiveGenerator {
    /// Live mode: delegate to the external model, falling back on failure.
    pub fn live(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            mode: GenerationMode::Live,
            gateway: Some(gateway),
        }
    }

    /// Demo mode: deterministic templates, no external calls.
    pub fn demo() -> Self {
        Self {
            mode: GenerationMode::Demo,
            gateway: None,
        }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generate a perspective draft. Never fails; see module docs.
    pub async fn generate(&self, persona: &Persona, article: &Article) -> PerspectiveDraft {
        match self.mode {
            GenerationMode::Demo => demo_perspective(persona, article),
            GenerationMode::Live => match self.generate_live(persona, article).await {
                Ok(draft) => draft,
                Err(e) => {
                    warn!(
                        persona = %persona.slug,
                        article = %article.slug,
                        error = %e,
                        "live generation failed, returning fallback perspective"
                    );
                    PerspectiveDraft::unavailable(&persona.name)
                }
            },
        }
    }

    async fn generate_live(
        &self,
        persona: &Persona,
        article: &Article,
    ) -> Result<PerspectiveDraft, GatewayError> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or(GatewayError::MissingCredential)?;

        let request = CompletionRequest {
            system: PerspectivePrompt::system(persona),
            user: PerspectivePrompt::task(article),
            temperature: LIVE_TEMPERATURE,
            json_object: true,
        };

        let raw = gateway.complete(request).await?;
        debug!(persona = %persona.slug, bytes = raw.len(), "model response received");

        let parsed: RawDraft =
            serde_json::from_str(&raw).map_err(|e| GatewayError::Parse(e.to_string()))?;
        Ok(parsed.into_draft(&persona.name))
    }
}

/// Loosely-typed model output; every field is optional and defaulted.
#[derive(Debug, Deserialize)]
struct RawDraft {
    headline: Option<String>,
    content: Option<String>,
    #[serde(alias = "keyPoints")]
    key_points: Option<Vec<String>>,
    sentiment: Option<String>,
}

impl RawDraft {
    fn into_draft(self, persona_name: &str) -> PerspectiveDraft {
        PerspectiveDraft {
            headline: self
                .headline
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| format!("{}'s Take", persona_name)),
            content: self
                .content
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "No analysis available.".to_string()),
            key_points: self.key_points.unwrap_or_default(),
            sentiment: self
                .sentiment
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vantage_domain::{PersonaCategory, Sentiment, Slug};

    struct FixedGateway {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl FixedGateway {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(|_| GatewayError::Connection("connection refused".to_string()))
        }
    }

    fn persona() -> Persona {
        Persona::new(
            "p-1",
            Slug::new("dr-ada-chen").unwrap(),
            "Dr. Ada Chen",
            "AI Researcher",
            PersonaCategory::Professional,
            Utc::now(),
        )
        .with_description("d")
        .with_traits(vec!["analytical".to_string()])
        .with_speaking_style("precise")
        .with_expertise("machine learning")
    }

    fn article() -> Article {
        Article::new(
            "a-1",
            Slug::new("test-event").unwrap(),
            "Test Event",
            "admin",
            Utc::now(),
        )
        .with_summary("s")
        .with_content("c")
        .with_category("General")
    }

    #[tokio::test]
    async fn test_demo_mode_matches_templates() {
        let generator = PerspectiveGenerator::demo();
        assert_eq!(generator.mode(), GenerationMode::Demo);

        let draft = generator.generate(&persona(), &article()).await;
        assert_eq!(draft, demo_perspective(&persona(), &article()));
        assert!(draft.content.contains("machine learning"));
    }

    #[tokio::test]
    async fn test_live_mode_parses_full_response() {
        let gateway = Arc::new(FixedGateway::ok(
            r#"{"headline":"H","content":"C","keyPoints":["k1","k2"],"sentiment":"mixed"}"#,
        ));
        let generator = PerspectiveGenerator::live(gateway.clone());

        let draft = generator.generate(&persona(), &article()).await;
        assert_eq!(draft.headline, "H");
        assert_eq!(draft.content, "C");
        assert_eq!(draft.key_points, vec!["k1", "k2"]);
        assert_eq!(draft.sentiment, Sentiment::Mixed);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_live_mode_defaults_missing_fields() {
        let gateway = Arc::new(FixedGateway::ok(r#"{"sentiment":"sideways"}"#));
        let generator = PerspectiveGenerator::live(gateway);

        let draft = generator.generate(&persona(), &article()).await;
        assert_eq!(draft.headline, "Dr. Ada Chen's Take");
        assert_eq!(draft.content, "No analysis available.");
        assert!(draft.key_points.is_empty());
        assert_eq!(draft.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_live_mode_falls_back_on_non_json() {
        let gateway = Arc::new(FixedGateway::ok("I refuse to answer in JSON."));
        let generator = PerspectiveGenerator::live(gateway);

        let draft = generator.generate(&persona(), &article()).await;
        assert_eq!(draft, PerspectiveDraft::unavailable("Dr. Ada Chen"));
    }

    #[tokio::test]
    async fn test_live_mode_falls_back_on_gateway_error() {
        let gateway = Arc::new(FixedGateway::failing());
        let generator = PerspectiveGenerator::live(gateway.clone());

        let draft = generator.generate(&persona(), &article()).await;
        assert_eq!(draft.headline, "Dr. Ada Chen is Currently Unavailable");
        assert_eq!(draft.key_points, vec!["Analysis pending".to_string()]);
        assert_eq!(draft.sentiment, Sentiment::Neutral);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
