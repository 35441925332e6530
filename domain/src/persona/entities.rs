//! Persona entities
//!
//! A persona is a configured identity with fixed personality attributes. It is
//! created by an administrator, mutated only by administrator edits, and
//! soft-deactivated via the `active` flag rather than deleted.

use crate::core::error::DomainError;
use crate::core::slug::Slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad category a persona belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaCategory {
    Philosopher,
    Historical,
    Object,
    Character,
    Professional,
}

impl fmt::Display for PersonaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PersonaCategory::Philosopher => "philosopher",
            PersonaCategory::Historical => "historical",
            PersonaCategory::Object => "object",
            PersonaCategory::Character => "character",
            PersonaCategory::Professional => "professional",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PersonaCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "philosopher" => Ok(PersonaCategory::Philosopher),
            "historical" => Ok(PersonaCategory::Historical),
            "object" => Ok(PersonaCategory::Object),
            "character" => Ok(PersonaCategory::Character),
            "professional" => Ok(PersonaCategory::Professional),
            other => Err(DomainError::Validation(format!(
                "unknown persona category: {}",
                other
            ))),
        }
    }
}

/// A configured commentary identity (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    /// Globally unique, immutable after creation
    pub slug: Slug,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Personality traits; order is not significant
    pub traits: Vec<String>,
    pub speaking_style: String,
    pub expertise: String,
    pub quirks: Vec<String>,
    pub category: PersonaCategory,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Persona {
    pub fn new(
        id: impl Into<String>,
        slug: Slug,
        name: impl Into<String>,
        title: impl Into<String>,
        category: PersonaCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            slug,
            name: name.into(),
            title: title.into(),
            description: String::new(),
            image_url: None,
            traits: Vec::new(),
            speaking_style: String::new(),
            expertise: String::new(),
            quirks: Vec::new(),
            category,
            active: true,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_traits(mut self, traits: Vec<String>) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_speaking_style(mut self, style: impl Into<String>) -> Self {
        self.speaking_style = style.into();
        self
    }

    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = expertise.into();
        self
    }

    pub fn with_quirks(mut self, quirks: Vec<String>) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// First personality trait, used by the default demo template
    pub fn primary_trait(&self) -> Option<&str> {
        self.traits.first().map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() || self.name.len() > 100 {
            return Err(DomainError::Validation(
                "persona name must be 1-100 characters".to_string(),
            ));
        }
        if self.title.is_empty() || self.title.len() > 200 {
            return Err(DomainError::Validation(
                "persona title must be 1-200 characters".to_string(),
            ));
        }
        if self.description.is_empty() {
            return Err(DomainError::Validation(
                "persona description is required".to_string(),
            ));
        }
        if self.traits.is_empty() {
            return Err(DomainError::Validation(
                "at least one personality trait is required".to_string(),
            ));
        }
        if self.speaking_style.is_empty() {
            return Err(DomainError::Validation(
                "speaking style is required".to_string(),
            ));
        }
        if self.expertise.is_empty() {
            return Err(DomainError::Validation("expertise is required".to_string()));
        }
        Ok(())
    }

    /// Apply an administrator edit. The slug is immutable and not patchable.
    pub fn apply_update(&mut self, update: PersonaUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(traits) = update.traits {
            self.traits = traits;
        }
        if let Some(style) = update.speaking_style {
            self.speaking_style = style;
        }
        if let Some(expertise) = update.expertise {
            self.expertise = expertise;
        }
        if let Some(quirks) = update.quirks {
            self.quirks = quirks;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
    }
}

/// Partial administrator edit of a persona
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonaUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the image
    #[serde(default, with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub traits: Option<Vec<String>>,
    pub speaking_style: Option<String>,
    pub expertise: Option<String>,
    pub quirks: Option<Vec<String>>,
    pub category: Option<PersonaCategory>,
    pub active: Option<bool>,
}

pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
