use std::time::Duration;

use anyhow::Result;

use crate::errors::ConfigError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_NAME_VAR: &str = "GEMINI_MODEL_NAME";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const TIMEOUT_VAR: &str = "LLM_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables (and `.env` if present).
///
/// The credential is optional here; it is enforced when the LLM-backed
/// extractors are constructed, so a missing key surfaces as its own error.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub rust_log: String,
}

/// Settings shared by every component that talks to the hosted model.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: TIMEOUT_VAR,
                    message: format!("expected whole seconds ({e})"),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            llm: LlmSettings {
                api_key: lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()),
                model: lookup(MODEL_NAME_VAR)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl LlmSettings {
    /// Returns the API key or fails with a configuration error.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))
    }
}
