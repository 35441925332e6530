//! Article entities

use crate::core::error::DomainError;
use crate::core::slug::Slug;
use crate::persona::entities::double_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article (Entity)
///
/// `published_at` is set exactly when the `published` flag transitions to
/// true and is never rewritten by later edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    /// Globally unique
    pub slug: Slug,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        slug: Slug,
        title: impl Into<String>,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            slug,
            title: title.into(),
            summary: String::new(),
            content: String::new(),
            image_url: None,
            category: String::new(),
            tags: Vec::new(),
            published: false,
            featured: false,
            published_at: None,
            author: author.into(),
            created_at,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Mark the article published, stamping `published_at` on the first
    /// transition only.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        if !self.published {
            self.published = true;
            if self.published_at.is_none() {
                self.published_at = Some(now);
            }
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() || self.title.len() > 200 {
            return Err(DomainError::Validation(
                "article title must be 1-200 characters".to_string(),
            ));
        }
        if self.summary.is_empty() || self.summary.len() > 500 {
            return Err(DomainError::Validation(
                "article summary must be 1-500 characters".to_string(),
            ));
        }
        if self.content.is_empty() {
            return Err(DomainError::Validation(
                "article content is required".to_string(),
            ));
        }
        if self.category.is_empty() {
            return Err(DomainError::Validation(
                "article category is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply an administrator edit. The slug is immutable; publishing via an
    /// update goes through [`Article::publish`] so the timestamp invariant
    /// holds.
    pub fn apply_update(&mut self, update: ArticleUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(summary) = update.summary {
            self.summary = summary;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        match update.published {
            Some(true) => self.publish(now),
            Some(false) => self.published = false,
            None => {}
        }
    }
}

/// Partial administrator edit of an article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the image
    #[serde(default, with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "a-1",
            Slug::new("test-event").unwrap(),
            "Test Event",
            "admin",
            Utc::now(),
        )
        .with_summary("A thing happened.")
        .with_content("Details of the thing that happened.")
        .with_category("General")
    }

    #[test]
    fn test_validate_accepts_complete_article() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_publish_sets_timestamp_once() {
        let mut article = sample();
        assert!(article.published_at.is_none());

        let first = Utc::now();
        article.publish(first);
        assert!(article.published);
        assert_eq!(article.published_at, Some(first));

        // Unpublish and re-publish keeps the original timestamp
        article.published = false;
        article.publish(Utc::now());
        assert_eq!(article.published_at, Some(first));
    }

    #[test]
    fn test_apply_update_publish_transition() {
        let mut article = sample();
        let now = Utc::now();
        article.apply_update(
            ArticleUpdate {
                published: Some(true),
                featured: Some(true),
                ..Default::default()
            },
            now,
        );
        assert!(article.published);
        assert!(article.featured);
        assert_eq!(article.published_at, Some(now));
    }

    #[test]
    fn test_validate_rejects_oversized_summary() {
        let mut article = sample();
        article.summary = "x".repeat(501);
        assert!(article.validate().is_err());
    }
}
