//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use serde::{Deserialize, Serialize};

/// Credential value that means "no key configured". Fresh installs ship with
/// this placeholder so the server comes up in demo mode out of the box.
const PLACEHOLDER_API_KEY: &str = "your-openai-api-key";

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// SQLite database settings
    pub database: DatabaseConfig,
    /// Model provider settings
    pub model: ModelConfig,
    /// Admin authentication settings
    pub admin: AdminConfig,
}

impl FileConfig {
    /// The configured model credential, if it enables live generation.
    ///
    /// Returns `None` for an empty or placeholder key. This is the single
    /// switch that decides the process-wide generation mode.
    pub fn live_credential(&self) -> Option<&str> {
        match self.model.api_key.as_deref() {
            Some("") | None => None,
            Some(PLACEHOLDER_API_KEY) => None,
            Some(key) => Some(key),
        }
    }
}

/// HTTP server settings (`[server]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "127.0.0.1:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// SQLite database settings (`[database]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "vantage.db".to_string(),
        }
    }
}

/// Model provider settings (`[model]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// API key; empty or placeholder selects demo mode
    pub api_key: Option<String>,
    /// Model name
    pub name: String,
    /// Base URL for OpenAI-compatible APIs
    pub base_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Admin authentication settings (`[admin]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required on mutating endpoints
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.database.path, "vantage.db");
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn test_live_credential_rejects_placeholder() {
        let mut config = FileConfig::default();
        assert!(config.live_credential().is_none());

        config.model.api_key = Some(String::new());
        assert!(config.live_credential().is_none());

        config.model.api_key = Some("your-openai-api-key".to_string());
        assert!(config.live_credential().is_none());

        config.model.api_key = Some("sk-real".to_string());
        assert_eq!(config.live_credential(), Some("sk-real"));
    }
}
