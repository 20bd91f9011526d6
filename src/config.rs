//! Configuration management for Quill.
//!
//! Handles loading configuration from a TOML file and applying environment
//! overrides. Environment access goes through a lookup function so callers
//! (and tests) decide where values come from.

use crate::error::{QuillError, Result};
use crate::llm::LlmProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the database path.
pub const ENV_DATABASE: &str = "QUILL_DATABASE";

/// Environment variable overriding the LLM provider.
pub const ENV_LLM_PROVIDER: &str = "QUILL_LLM_PROVIDER";

/// Environment variable overriding the LLM model.
pub const ENV_LLM_MODEL: &str = "QUILL_LLM_MODEL";

/// Main configuration structure for Quill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "gemini" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name. Empty means the provider's default model.
    #[serde(default)]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_database() -> PathBuf {
    PathBuf::from("student.db")
}

fn default_provider() -> String {
    LlmProvider::default().as_str().to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Parses the configured provider name.
    pub fn provider(&self) -> Result<LlmProvider> {
        self.provider.parse().map_err(QuillError::config)
    }

    /// Returns the configured model, or the provider's default when unset.
    pub fn model(&self) -> Result<String> {
        if self.model.trim().is_empty() {
            Ok(self.provider()?.default_model().to_string())
        } else {
            Ok(self.model.clone())
        }
    }

    /// Switches provider. The model is reset so the new provider's default
    /// applies unless a model is set afterwards.
    pub fn set_provider(&mut self, provider: &str) {
        if !self.provider.eq_ignore_ascii_case(provider) {
            self.provider = provider.to_string();
            self.model.clear();
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quill")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuillError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            QuillError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies `QUILL_*` overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            self.database = PathBuf::from(database);
        }
        if let Some(provider) = lookup(ENV_LLM_PROVIDER).filter(|v| !v.is_empty()) {
            self.llm.set_provider(&provider);
        }
        if let Some(model) = lookup(ENV_LLM_MODEL).filter(|v| !v.is_empty()) {
            self.llm.model = model;
        }
    }
}
