//! Article repository port

use super::StoreError;
use async_trait::async_trait;
use vantage_domain::Article;

/// Listing filter for articles
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub published_only: bool,
    pub category: Option<String>,
    pub featured_only: bool,
    pub limit: usize,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self {
            published_only: true,
            category: None,
            featured_only: false,
            limit: 10,
        }
    }
}

/// Repository for article records
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, article: &Article) -> Result<(), StoreError>;

    /// Persist an edited article, matched by id.
    async fn update(&self, article: &Article) -> Result<(), StoreError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError>;

    /// List articles matching the filter, newest publish date first.
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>, StoreError>;
}
