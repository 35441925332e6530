//! Generate Perspectives use case
//!
//! Orchestrates batch perspective generation for one article and a set of
//! requested personas: existing (article, persona) pairs are returned
//! unchanged, missing pairs are generated and persisted. Repeated calls with
//! the same inputs are idempotent by construction.

use crate::generator::PerspectiveGenerator;
use crate::ports::{
    ArticleRepository, PersonaRepository, PerspectiveRepository, StoreError,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;
use vantage_domain::Perspective;

/// Errors that abort a batch
///
/// Generator failures never appear here; they degrade to fallback drafts
/// inside the generator.
#[derive(Error, Debug)]
pub enum GenerateBatchError {
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the GeneratePerspectives use case
#[derive(Debug, Clone)]
pub struct GenerateBatchInput {
    pub article_id: String,
    /// Processed in this order; unknown ids are skipped.
    pub persona_ids: Vec<String>,
}

/// Use case for batch perspective generation
pub struct GeneratePerspectivesUseCase {
    generator: PerspectiveGenerator,
    articles: Arc<dyn ArticleRepository>,
    personas: Arc<dyn PersonaRepository>,
    perspectives: Arc<dyn PerspectiveRepository>,
}

impl GeneratePerspectivesUseCase {
    pub fn new(
        generator: PerspectiveGenerator,
        articles: Arc<dyn ArticleRepository>,
        personas: Arc<dyn PersonaRepository>,
        perspectives: Arc<dyn PerspectiveRepository>,
    ) -> Self {
        Self {
            generator,
            articles,
            personas,
            perspectives,
        }
    }

    pub async fn execute(
        &self,
        input: GenerateBatchInput,
    ) -> Result<Vec<Perspective>, GenerateBatchError> {
        let article = self
            .articles
            .find_by_id(&input.article_id)
            .await?
            .ok_or_else(|| GenerateBatchError::ArticleNotFound(input.article_id.clone()))?;

        let personas = self.personas.find_many(&input.persona_ids).await?;
        info!(
            article = %article.slug,
            requested = input.persona_ids.len(),
            resolved = personas.len(),
            mode = ?self.generator.mode(),
            "starting perspective batch"
        );

        let mut results = Vec::with_capacity(personas.len());

        for persona in personas {
            if let Some(existing) = self
                .perspectives
                .find_for_pair(&article.id, &persona.id)
                .await?
            {
                debug!(persona = %persona.slug, "perspective already exists, skipping");
                results.push(existing);
                continue;
            }

            let draft = self.generator.generate(&persona, &article).await;
            let record = Perspective::from_draft(
                Uuid::new_v4().to_string(),
                article.id.clone(),
                persona.id.clone(),
                draft,
                true,
                Utc::now(),
            );

            match self.perspectives.insert(&record).await {
                Ok(()) => {
                    debug!(persona = %persona.slug, "perspective created");
                    results.push(record);
                }
                // A concurrent caller won the race for this pair; theirs is
                // the record of truth.
                Err(StoreError::Duplicate) => {
                    debug!(persona = %persona.slug, "lost insert race, reading existing record");
                    let existing = self
                        .perspectives
                        .find_for_pair(&article.id, &persona.id)
                        .await?
                        .ok_or(StoreError::NotFound)?;
                    results.push(existing);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(results)
    }
}
