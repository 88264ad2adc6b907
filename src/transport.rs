//! # Transport
//!
//! Builds the authenticated HTTP client used for every control plane call.
//!
//! Each provider configuration gets its own `reqwest::Client` carrying the
//! `Authorization` and `User-Agent` headers as defaults, so two providers
//! configured in the same process never share credentials.

use crate::config::ResolvedConfig;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Client;

/// Descriptive client identifier sent with every request
pub fn user_agent(version: &str) -> String {
    format!(
        "wundergraph-provider/{version} ({}; {})",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Default headers for a resolved configuration
///
/// # Errors
/// Returns an error if the API key or version contain characters not allowed in a header
pub fn default_headers(config: &ResolvedConfig, version: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
        .context("API key contains characters that are not valid in an HTTP header")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&user_agent(version))
            .context("Provider version is not valid in an HTTP header")?,
    );

    Ok(headers)
}

/// Create a dedicated HTTP client for one provider configuration
///
/// # Errors
/// Returns an error if headers are invalid or the TLS backend cannot be initialized
pub fn build_http_client(config: &ResolvedConfig, version: &str) -> Result<Client> {
    Client::builder()
        .default_headers(default_headers(config, version)?)
        .timeout(config.timeout)
        .build()
        .context("Failed to create HTTP client")
}
