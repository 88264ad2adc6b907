//! # Logging Configuration
//!
//! Log settings for the binaries, loaded from `LOG_LEVEL` and `LOG_FORMAT`.

use super::env_var_or_default_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Global log level (error, warn, info, debug, trace)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            level: env_var_or_default_str("LOG_LEVEL", "info").to_lowercase(),
            format: parse_format(&env_var_or_default_str("LOG_FORMAT", "text")),
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!("wundergraph_provider={}", self.level)
    }
}

fn parse_format(raw: &str) -> LogFormat {
    if raw.eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}
