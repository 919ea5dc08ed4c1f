//! Configuration management

use tracing::{info, warn};

use crate::core::errors::{LlmError, Result};
use crate::core::models::{BackendMode, Language};

pub const DEFAULT_TRANSLATION_MODEL: &str = "Qwen/Qwen3-VL-30B-A3B-Instruct";
pub const DEFAULT_CRITIQUE_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;

/// Application configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub enable_mocks: bool,
    pub api_key: Option<String>,
    pub api_endpoint: Option<String>,
    pub translation_model: String,
    pub critique_model: String,
    pub timeout_ms: u64,
    pub max_text_length: usize,
    pub default_language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_mocks: false,
            api_key: None,
            api_endpoint: None,
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            critique_model: DEFAULT_CRITIQUE_MODEL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            default_language: Language::English,
        }
    }
}

impl AppConfig {
    /// Mock-mode configuration with defaults for everything else
    pub fn mock() -> Self {
        Self {
            enable_mocks: true,
            ..Default::default()
        }
    }

    /// Live-mode configuration against `endpoint`
    pub fn live(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_endpoint: Some(endpoint.into()),
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset. The result is validated before it is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let enable_mocks = match get("ENABLE_MOCKS") {
            Some(raw) => parse_flag("ENABLE_MOCKS", &raw)?,
            None => false,
        };

        let timeout_ms = match get("REQUEST_TIMEOUT_MS") {
            Some(raw) => parse_number("REQUEST_TIMEOUT_MS", &raw)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let max_text_length = match get("MAX_TEXT_LENGTH") {
            Some(raw) => parse_number("MAX_TEXT_LENGTH", &raw)?,
            None => DEFAULT_MAX_TEXT_LENGTH,
        };

        let default_language = match get("DEFAULT_LANGUAGE") {
            Some(raw) => raw.parse::<Language>().map_err(|_| {
                LlmError::misconfiguration(format!("DEFAULT_LANGUAGE is not supported: {}", raw))
            })?,
            None => Language::English,
        };

        let config = Self {
            enable_mocks,
            api_key: get("MENTORPIECE_API_KEY"),
            api_endpoint: get("MENTORPIECE_ENDPOINT"),
            translation_model: get("TRANSLATION_MODEL")
                .unwrap_or_else(|| DEFAULT_TRANSLATION_MODEL.to_string()),
            critique_model: get("CRITIQUE_MODEL")
                .unwrap_or_else(|| DEFAULT_CRITIQUE_MODEL.to_string()),
            timeout_ms,
            max_text_length,
            default_language,
        };

        config.validate()?;
        info!(
            "Configuration loaded: mode={}, timeout={}ms",
            config.mode(),
            config.timeout_ms
        );

        Ok(config)
    }

    /// Backend selected by this configuration
    pub fn mode(&self) -> BackendMode {
        if self.enable_mocks {
            BackendMode::Mock
        } else {
            BackendMode::Live
        }
    }

    /// Validate configuration
    ///
    /// Mocks together with a credential is ambiguous and rejected rather than
    /// resolved by precedence.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(LlmError::misconfiguration("timeout_ms must be greater than 0"));
        }

        if self.max_text_length == 0 {
            return Err(LlmError::misconfiguration("max_text_length must be greater than 0"));
        }

        if self.translation_model.is_empty() || self.critique_model.is_empty() {
            return Err(LlmError::misconfiguration("model names must not be empty"));
        }

        match self.mode() {
            BackendMode::Mock => {
                if self.api_key.is_some() {
                    return Err(LlmError::misconfiguration(
                        "ENABLE_MOCKS is on but MENTORPIECE_API_KEY is also set; unset one of them",
                    ));
                }
                if self.api_endpoint.is_some() {
                    warn!("MENTORPIECE_ENDPOINT is ignored in mock mode");
                }
            }
            BackendMode::Live => {
                if self.api_key.as_deref().map_or(true, str::is_empty) {
                    return Err(LlmError::misconfiguration(
                        "MENTORPIECE_API_KEY is required unless ENABLE_MOCKS is on",
                    ));
                }
                match self.api_endpoint.as_deref() {
                    Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                    Some(url) => {
                        return Err(LlmError::misconfiguration(format!(
                            "MENTORPIECE_ENDPOINT must be an http(s) URL, got {}",
                            url
                        )));
                    }
                    None => {
                        return Err(LlmError::misconfiguration(
                            "MENTORPIECE_ENDPOINT is required unless ENABLE_MOCKS is on",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LlmError::misconfiguration(format!(
            "{} must be a boolean, got {}",
            key, raw
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        LlmError::misconfiguration(format!("{} must be a non-negative integer, got {}", key, raw))
    })
}
