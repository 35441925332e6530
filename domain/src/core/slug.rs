//! Slug value object
//!
//! Slugs are stable, URL-safe identifiers. They are globally unique within
//! their entity kind and immutable after creation.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, URL-safe slug (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug from an already-slugified string.
    ///
    /// Accepts lowercase alphanumerics and hyphens; rejects everything else.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidSlug("empty slug".to_string()));
        }
        let valid = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid || raw.starts_with('-') || raw.ends_with('-') {
            return Err(DomainError::InvalidSlug(raw));
        }
        Ok(Self(raw))
    }

    /// Derive a slug from free text: lowercase, runs of non-alphanumerics
    /// collapsed to single hyphens, leading/trailing hyphens stripped.
    pub fn from_text(text: &str) -> Result<Self, DomainError> {
        let mut out = String::with_capacity(text.len());
        let mut last_hyphen = true;
        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
                last_hyphen = false;
            } else if !last_hyphen {
                out.push('-');
                last_hyphen = true;
            }
        }
        while out.ends_with('-') {
            out.pop();
        }
        Self::new(out)
    }

    /// Derive a slug from free text with a uniquifying suffix appended.
    pub fn from_text_with_suffix(text: &str, suffix: &str) -> Result<Self, DomainError> {
        let base = Self::from_text(text)?;
        Self::new(format!("{}-{}", base.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slug() {
        let slug = Slug::new("abraham-lincoln").unwrap();
        assert_eq!(slug.as_str(), "abraham-lincoln");
    }

    #[test]
    fn test_rejects_uppercase_and_spaces() {
        assert!(Slug::new("Abraham Lincoln").is_err());
        assert!(Slug::new("").is_err());
        assert!(Slug::new("-leading").is_err());
        assert!(Slug::new("trailing-").is_err());
    }

    #[test]
    fn test_from_text_collapses_punctuation() {
        let slug = Slug::from_text("Tech Giants Announce: Major AI Safety Initiative!").unwrap();
        assert_eq!(slug.as_str(), "tech-giants-announce-major-ai-safety-initiative");
    }

    #[test]
    fn test_from_text_with_suffix() {
        let slug = Slug::from_text_with_suffix("Breaking News", "a1b2c3d4").unwrap();
        assert_eq!(slug.as_str(), "breaking-news-a1b2c3d4");
    }
}
