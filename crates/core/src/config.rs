//! Middleware configuration.
//!
//! Loaded from TOML with per-field defaults and environment variable
//! overrides. The middleware holds exactly one `RagConfig` instance behind
//! its connection lock; it is replaced wholesale via `update_config`, never
//! mutated field-by-field from outside.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration for the RAG middleware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// Retrieval service host. Either a bare host (`"localhost"`) or a
    /// scheme-qualified URL (`"https://rag.example.com/"`). A scheme-qualified
    /// host forces the scheme's default port at connection time.
    #[serde(default = "default_host")]
    pub host: String,

    /// Retrieval service port. Ignored when `host` carries a scheme.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of context chunks to request.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Minimum similarity score for returned chunks.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Whether to ask the service for tool suggestions.
    #[serde(default)]
    pub include_tools: bool,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether augmentation is enabled at all.
    #[serde(default)]
    pub enabled: bool,
}

fn default_host() -> String {
    "localhost".into()
}
fn default_port() -> u16 {
    8001
}
fn default_max_results() -> u32 {
    5
}
fn default_similarity_threshold() -> f32 {
    0.3
}
fn default_timeout_ms() -> u64 {
    5000
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_results: default_max_results(),
            similarity_threshold: default_similarity_threshold(),
            include_tools: false,
            timeout_ms: default_timeout_ms(),
            enabled: false,
        }
    }
}

impl RagConfig {
    /// Load configuration from a TOML file, then apply environment variable
    /// overrides:
    /// - `RAGBRIDGE_RAG_HOST`
    /// - `RAGBRIDGE_RAG_PORT`
    /// - `RAGBRIDGE_RAG_ENABLED` (`"true"` / `"false"`)
    ///
    /// A missing file yields the defaults rather than an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            tracing::info!(path = %path.display(), "No RAG config file found, using defaults");
            Self::default()
        };

        if let Ok(host) = std::env::var("RAGBRIDGE_RAG_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("RAGBRIDGE_RAG_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("invalid port: {port}")))?;
        }
        if let Ok(enabled) = std::env::var("RAGBRIDGE_RAG_ENABLED") {
            config.enabled = enabled == "true" || enabled == "1";
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ValidationError(
                "similarity_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_ms must be greater than 0".into(),
            ));
        }
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("host must not be empty".into()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: String, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
