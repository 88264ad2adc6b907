//! # Errors
//!
//! Error taxonomy for provider operations.
//!
//! - transport: the HTTP call itself failed (network, TLS, timeout, undecodable body)
//! - rpc: the control plane answered with a Connect error instead of a message
//! - status: the call succeeded but the embedded response code is not `OK`
//! - validation: local input could not be mapped, raised before any remote call
//! - not found: an expected entity was missing from a list scan
//!
//! None of these are retried; every error is terminal for the operation that raised it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed with rpc error {code}: {message}")]
    Rpc {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("{summary}: {details}")]
    Status { summary: String, details: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{summary}: {detail}")]
    NotFound { summary: String, detail: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProviderError {
    /// Short summary line suitable for a diagnostic headline
    pub fn summary(&self) -> String {
        match self {
            Self::Transport { operation, .. } | Self::Rpc { operation, .. } => {
                format!("Error calling {operation}")
            }
            Self::Status { summary, .. } | Self::NotFound { summary, .. } => summary.clone(),
            Self::Validation(_) => "Invalid configuration value".to_string(),
            Self::Config(_) => "Invalid provider configuration".to_string(),
        }
    }

    /// Detail line suitable for a diagnostic body
    pub fn detail(&self) -> String {
        match self {
            Self::Transport { source, .. } => source.to_string(),
            Self::Rpc { code, message, .. } => format!("{code}: {message}"),
            Self::Status { details, .. } => details.clone(),
            Self::NotFound { detail, .. } => detail.clone(),
            Self::Validation(e) => e.to_string(),
            Self::Config(e) => e.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Local input errors, always raised before the first remote call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid label matcher")]
    LabelMatcherParse,

    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("invalid import id {0:?}: expected <id> or <namespace>/<id>")]
    InvalidImportId(String),

    #[error("missing {0}")]
    MissingInput(&'static str),

    #[error("invalid {what}: {reason}")]
    InvalidInput { what: &'static str, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api_key must be set: expected a non-empty value for api_key or {0}")]
    MissingApiKey(&'static str),

    #[error("invalid api_url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("invalid {name} value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;
