//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{AdminConfig, DatabaseConfig, FileConfig, ModelConfig, ServerConfig};
pub use loader::ConfigLoader;
