//! Perspective repository port
//!
//! The store enforces the (article_id, persona_id) uniqueness invariant; the
//! application layer never has to lock around it.

use super::StoreError;
use async_trait::async_trait;
use vantage_domain::Perspective;

/// Repository for perspective records
#[async_trait]
pub trait PerspectiveRepository: Send + Sync {
    /// Insert a new perspective. A write rejected by the pair-uniqueness
    /// constraint returns [`StoreError::Duplicate`].
    async fn insert(&self, perspective: &Perspective) -> Result<(), StoreError>;

    async fn find_for_pair(
        &self,
        article_id: &str,
        persona_id: &str,
    ) -> Result<Option<Perspective>, StoreError>;

    async fn list_for_article(&self, article_id: &str) -> Result<Vec<Perspective>, StoreError>;

    /// Recent perspectives by one persona, newest first.
    async fn list_for_persona(
        &self,
        persona_id: &str,
        limit: usize,
    ) -> Result<Vec<Perspective>, StoreError>;
}
