//! Persona repository port

use super::StoreError;
use async_trait::async_trait;
use vantage_domain::Persona;

/// Repository for persona records
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    async fn insert(&self, persona: &Persona) -> Result<(), StoreError>;

    /// Persist an edited persona, matched by id. Slugs never change.
    async fn update(&self, persona: &Persona) -> Result<(), StoreError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Persona>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Persona>, StoreError>;

    /// Resolve personas by id, preserving the input order. Unknown ids are
    /// dropped, not errors.
    async fn find_many(&self, ids: &[String]) -> Result<Vec<Persona>, StoreError>;

    async fn list(&self, include_inactive: bool) -> Result<Vec<Persona>, StoreError>;
}
