//! Client configuration

use crate::client::CHAT_PATH;
use crate::ConfigError;

/// Default target: Ollama on its standard local port
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an NPC in a medieval town. Keep responses short, characterful, and friendly.";

/// Settings fixed for the lifetime of a [`crate::ChatClient`].
///
/// | Variable               | Default                  |
/// |------------------------|--------------------------|
/// | `PARLEY_BASE_URL`      | `http://localhost:11434` |
/// | `PARLEY_MODEL`         | `llama3`                 |
/// | `PARLEY_TIMEOUT`       | `60`                     |
/// | `PARLEY_SYSTEM_PROMPT` | medieval NPC persona     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub system_prompt: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Defaults overridden by `PARLEY_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if let Ok(url) = std::env::var("PARLEY_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("PARLEY_MODEL") {
            config.model = model;
        }
        if let Ok(timeout) = std::env::var("PARLEY_TIMEOUT") {
            config.timeout_secs = parse_timeout(&timeout)?;
        }
        if let Ok(prompt) = std::env::var("PARLEY_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }
        Ok(config)
    }

    /// Base URL without surrounding whitespace or trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Full chat endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.normalized_base_url(), CHAT_PATH)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let base = self.normalized_base_url();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let url = reqwest::Url::parse(base).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base.to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(value.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(secs)
}
