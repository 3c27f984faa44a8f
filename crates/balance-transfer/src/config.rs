//! Exchange client configuration.
//!
//! Values come from the environment so credentials never live in source:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BALANCE_SHAPESHIFT_URL` | `https://shapeshift.io` |
//! | `BALANCE_SHAPESHIFT_API_KEY` | unset |
//! | `BALANCE_SHAPESHIFT_TIMEOUT_MS` | `3000` |

use std::fmt::{Debug, Formatter};

use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://shapeshift.io";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

const ENV_BASE_URL: &str = "BALANCE_SHAPESHIFT_URL";
const ENV_API_KEY: &str = "BALANCE_SHAPESHIFT_API_KEY";
const ENV_TIMEOUT_MS: &str = "BALANCE_SHAPESHIFT_TIMEOUT_MS";

/// Connection settings and credentials for the exchange API client.
#[derive(Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ExchangeConfig {
    /// Build configuration from `BALANCE_SHAPESHIFT_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(base_url)?;
        }

        config.api_key = lookup(ENV_API_KEY)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidConfig {
                    key: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            config = config.with_timeout_ms(timeout_ms)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(ValidationError::InvalidConfig {
                key: ENV_BASE_URL,
                value: base_url,
            });
        }
        self.base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                key: ENV_TIMEOUT_MS,
                value: timeout_ms.to_string(),
            });
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }
}

impl Debug for ExchangeConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
