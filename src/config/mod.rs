//! Configuration management.
//!
//! Built-in defaults layered under `WARBLER_`-prefixed environment
//! variables (`WARBLER_BEARER_TOKEN`, `WARBLER_USER_AGENT`, ...).

use serde::Deserialize;

/// Application-level bearer credential used by the service's own web
/// client. This is not a user secret; it identifies the web application
/// and is required on every request. Override with `WARBLER_BEARER_TOKEN`.
pub const DEFAULT_BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level bearer credential sent on every request
    #[serde(default = "default_bearer_token")]
    pub bearer_token: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL of the guest-token activation endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the search endpoint
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Retry budget for recoverable upstream errors; 0 disables retry
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bearer_token: default_bearer_token(),
            user_agent: default_user_agent(),
            api_base_url: default_api_base_url(),
            search_base_url: default_search_base_url(),
            max_retry_attempts: default_max_retry_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bearer_token() -> String {
    DEFAULT_BEARER_TOKEN.to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_api_base_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_search_base_url() -> String {
    "https://twitter.com".to_string()
}

fn default_max_retry_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from the environment over built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("WARBLER"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user_agent, concat!("warbler/", env!("CARGO_PKG_VERSION")));
        assert_eq!(config.max_retry_attempts, 3);
        assert_eq!(config.api_base_url, "https://api.twitter.com");
        assert!(!config.bearer_token.is_empty());
    }
}
