//! # Configuration
//!
//! Provider-level settings.
//!
//! - `provider`: API credentials and endpoint, explicit values first, environment second
//! - `logging`: log level and format for the binaries

pub mod logging;
pub mod provider;

pub use logging::{LogConfig, LogFormat};
pub use provider::{ProviderConfig, ResolvedConfig};

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
