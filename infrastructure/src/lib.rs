//! Infrastructure layer for vantage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: SQLite-backed repositories, the OpenAI
//! model gateway, configuration file loading, and seed data.

pub mod config;
pub mod providers;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use providers::OpenAiGateway;
pub use store::{
    Database, DbPool, SqliteArticleRepository, SqlitePersonaRepository,
    SqlitePerspectiveRepository,
};
