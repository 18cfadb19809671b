use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const ADDR_VAR: &str = "PLANT_DIARY_ADDR";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

pub const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const API_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-20250514";
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ANTHROPIC_API_KEY must be set in the environment or .env file")]
    MissingApiKey,

    #[error("PLANT_DIARY_ADDR is not a valid socket address: {0}")]
    InvalidAddr(#[from] std::net::AddrParseError),
}

/// Where and how to reach the provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
    pub api_version: String,
    pub model: String,
    pub max_tokens: u32,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            url: MESSAGES_URL.to_string(),
            api_key: api_key.into(),
            api_version: API_VERSION.to_string(),
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let addr = lookup(ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()?;

        Ok(Self {
            addr,
            provider: ProviderConfig::new(api_key),
        })
    }
}
