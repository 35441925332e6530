//! Domain layer for vantage
//!
//! This crate contains the core business entities and pure generation logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Persona
//!
//! A configured identity (philosopher, historical figure, sentient object, ...)
//! with fixed personality attributes used to produce in-character commentary.
//!
//! ## Perspective
//!
//! One persona's commentary on one article: headline, content, key points,
//! and sentiment. At most one perspective exists per (article, persona) pair.
//!
//! ## Demo templates
//!
//! A deterministic, persona-keyed template table that makes the system fully
//! functional without any live model credential.

pub mod article;
pub mod core;
pub mod persona;
pub mod perspective;
pub mod prompt;

// Re-export commonly used types
pub use article::{Article, ArticleUpdate};
pub use self::core::{error::DomainError, slug::Slug};
pub use persona::{Persona, PersonaCategory, PersonaUpdate};
pub use perspective::{
    entities::{Perspective, PerspectiveDraft, Sentiment},
    templates::demo_perspective,
};
pub use prompt::PerspectivePrompt;
