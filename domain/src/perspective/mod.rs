//! Perspective domain module

pub mod entities;
pub mod templates;

pub use entities::{Perspective, PerspectiveDraft, Sentiment};
pub use templates::demo_perspective;
