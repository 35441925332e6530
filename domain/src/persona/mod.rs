//! Persona domain module

pub mod entities;

pub use entities::{Persona, PersonaCategory, PersonaUpdate};
