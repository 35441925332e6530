//! Prompt templates for live generation

pub mod template;

pub use template::PerspectivePrompt;
