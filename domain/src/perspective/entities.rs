//! Perspective entities
//!
//! A perspective is one persona's commentary on one article. The pair
//! (article_id, persona_id) is unique; a perspective is created once and
//! immutable thereafter.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall sentiment of a perspective toward its article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Mixed => "mixed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Sentiment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "mixed" => Ok(Sentiment::Mixed),
            other => Err(DomainError::Validation(format!(
                "unknown sentiment: {}",
                other
            ))),
        }
    }
}

/// The four-field output shape shared by both generation modes (Value Object)
///
/// Keeping the shape separate from the content source lets the orchestrator
/// and the store stay agnostic to which mode produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveDraft {
    pub headline: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub sentiment: Sentiment,
}

impl PerspectiveDraft {
    /// Fixed fallback used when live generation fails for any reason.
    pub fn unavailable(persona_name: &str) -> Self {
        Self {
            headline: format!("{} is Currently Unavailable", persona_name),
            content: format!(
                "{} is taking a moment to gather their thoughts on this matter. \
                 Please check back later for their unique perspective.",
                persona_name
            ),
            key_points: vec!["Analysis pending".to_string()],
            sentiment: Sentiment::Neutral,
        }
    }
}

/// A persisted perspective record (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perspective {
    pub id: String,
    pub article_id: String,
    pub persona_id: String,
    pub headline: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub sentiment: Sentiment,
    /// Whether the record was machine-generated (as opposed to seeded)
    pub generated: bool,
    pub created_at: DateTime<Utc>,
}

impl Perspective {
    pub fn from_draft(
        id: impl Into<String>,
        article_id: impl Into<String>,
        persona_id: impl Into<String>,
        draft: PerspectiveDraft,
        generated: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            article_id: article_id.into(),
            persona_id: persona_id.into(),
            headline: draft.headline,
            content: draft.content,
            key_points: draft.key_points,
            sentiment: draft.sentiment,
            generated,
            created_at,
        }
    }
}
