//! Configuration loading, validation, and management for algomentor.
//!
//! Loads configuration from `~/.algomentor/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.algomentor/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM runtime settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Vector index settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Conversation history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// OCR sidecar settings
    #[serde(default)]
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model used for query embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".into()
}
fn default_model() -> String {
    "llama3.2:latest".into()
}
fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path to the prebuilt passage index (read-only after load)
    #[serde(default = "default_index_path")]
    pub path: PathBuf,

    /// How many passages to retrieve per turn
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_index_path() -> PathBuf {
    PathBuf::from("vectorstore/index.json")
}
fn default_top_k() -> usize {
    2
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum conversation length: 1 system message + N turn messages
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

fn default_max_messages() -> usize {
    21
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Whether image input is enabled at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OCR sidecar endpoint (POST, base64 image payload)
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,

    /// Language hint passed to the OCR engine
    #[serde(default = "default_ocr_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_ocr_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}
fn default_ocr_endpoint() -> String {
    "http://localhost:8601/v1/ocr".into()
}
fn default_ocr_language() -> String {
    "en".into()
}
fn default_ocr_timeout_secs() -> u64 {
    30
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_ocr_endpoint(),
            language: default_ocr_language(),
            timeout_secs: default_ocr_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.algomentor/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `ALGOMENTOR_BASE_URL`
    /// - `ALGOMENTOR_MODEL`
    /// - `ALGOMENTOR_EMBEDDING_MODEL`
    /// - `ALGOMENTOR_INDEX_PATH`
    /// - `ALGOMENTOR_OCR_ENDPOINT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(url) = std::env::var("ALGOMENTOR_BASE_URL") {
            config.provider.base_url = url;
        }
        if let Ok(model) = std::env::var("ALGOMENTOR_MODEL") {
            config.provider.model = model;
        }
        if let Ok(model) = std::env::var("ALGOMENTOR_EMBEDDING_MODEL") {
            config.provider.embedding_model = model;
        }
        if let Ok(path) = std::env::var("ALGOMENTOR_INDEX_PATH") {
            config.index.path = PathBuf::from(path);
        }
        if let Ok(endpoint) = std::env::var("ALGOMENTOR_OCR_ENDPOINT") {
            config.ocr.endpoint = endpoint;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".algomentor")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.temperature < 0.0 || self.provider.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.index.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "index.top_k must be at least 1".into(),
            ));
        }

        // 1 system message + at least one user/assistant pair
        if self.history.max_messages < 3 {
            return Err(ConfigError::ValidationError(
                "history.max_messages must be at least 3".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for first-run onboarding).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            index: IndexConfig::default(),
            history: HistoryConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.model, "llama3.2:latest");
        assert_eq!(config.index.top_k, 2);
        assert_eq!(config.history.max_messages, 21);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider.model, config.provider.model);
        assert_eq!(parsed.index.path, config.index.path);
        assert_eq!(parsed.history.max_messages, config.history.max_messages);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            provider: ProviderConfig {
                temperature: 5.0,
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_top_k_rejected() {
        let config = AppConfig {
            index: IndexConfig {
                top_k: 0,
                ..IndexConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_history_bound_rejected() {
        let config = AppConfig {
            history: HistoryConfig { max_messages: 2 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().provider.model, "llama3.2:latest");
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[provider]\nmodel = \"qwen2.5:7b\"\n\n[index]\ntop_k = 4"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.provider.model, "qwen2.5:7b");
        assert_eq!(config.index.top_k, 4);
        // Untouched sections keep defaults
        assert_eq!(config.history.max_messages, 21);
        assert_eq!(config.provider.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3.2"));
        assert!(toml_str.contains("vectorstore"));
    }
}
