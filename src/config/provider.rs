//! # Provider Configuration
//!
//! Explicit configuration handed over by the host, resolved against the
//! `WGC_API_KEY` / `WGC_API_URL` / `WGC_API_TIMEOUT_SECS` environment fallbacks.

use crate::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL, ENV_API_KEY, ENV_API_TIMEOUT_SECS, ENV_API_URL,
};
use crate::error::ConfigError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeroize::Zeroizing;

/// Provider block as declared by the operator. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ProviderConfig {
    /// The API key for the provider.
    #[serde(default)]
    pub api_key: Option<String>,
    /// The API URL for the provider.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Per-request timeout against the control plane, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Fully resolved configuration used to build the transport
#[derive(Clone)]
pub struct ResolvedConfig {
    api_key: Zeroizing<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ResolvedConfig {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl ProviderConfig {
    /// Resolve against the process environment
    ///
    /// # Errors
    /// Returns an error if no API key is available or a value cannot be parsed
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if no API key is available or a value cannot be parsed
    pub fn resolve_with<F>(self, lookup: F) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .or_else(|| lookup(ENV_API_KEY))
            .unwrap_or_default();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey(ENV_API_KEY));
        }

        let mut api_url = self
            .api_url
            .or_else(|| lookup(ENV_API_URL))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        while api_url.ends_with('/') {
            api_url.pop();
        }
        reqwest::Url::parse(&api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: api_url.clone(),
            reason: e.to_string(),
        })?;

        let timeout_secs = match self.timeout_secs {
            Some(secs) => secs,
            None => match lookup(ENV_API_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
                Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_API_TIMEOUT_SECS,
                    value: raw,
                })?,
                None => DEFAULT_API_TIMEOUT_SECS,
            },
        };

        Ok(ResolvedConfig {
            api_key: Zeroizing::new(api_key),
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
