//! Oracle configuration loaded from TOML.

use crate::client::{OllamaClient, OpenAiClient, OracleProvider};
use crate::oracle::Oracle;
use crate::retry::RetryPolicy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the oracle and the retry policy.
///
/// Every field has a default, so an absent or empty config file yields
/// a working local-Ollama setup.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Oracle provider (ollama or openai).
    #[serde(default = "default_provider")]
    provider: OracleProvider,

    /// Base URL for the Ollama endpoint.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Model name.
    #[serde(default = "default_model")]
    model: String,

    /// Maximum tokens for OpenAI responses.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Maximum attempts for classification and move-proposal retries.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Delay between retry attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    retry_delay_ms: u64,
}

fn default_provider() -> OracleProvider {
    OracleProvider::Ollama
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl OracleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(provider = ?config.provider, model = %config.model, "Config loaded");
        Ok(config)
    }

    /// Retry policy derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    /// Builds the configured oracle client.
    ///
    /// The OpenAI provider requires the `OPENAI_API_KEY` environment
    /// variable; Ollama needs no credentials.
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn build_oracle(&self) -> Result<Arc<dyn Oracle>, ConfigError> {
        match self.provider {
            OracleProvider::Ollama => Ok(Arc::new(OllamaClient::new(
                self.base_url.clone(),
                self.model.clone(),
            ))),
            OracleProvider::OpenAi => {
                let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                    ConfigError::new("OPENAI_API_KEY environment variable not set".to_string())
                })?;
                Ok(Arc::new(OpenAiClient::new(
                    api_key,
                    self.model.clone(),
                    self.max_tokens,
                )))
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
