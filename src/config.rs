//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_HIT_DELAY, DEFAULT_TTL};

/// Default base URL of the inventory REST API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every endpoint is joined to
    pub base_url: String,
    /// Optional bearer token sent with every request
    pub api_token: Option<String>,
    /// TTL applied to cached reads that do not choose their own
    pub cache_default_ttl: Duration,
    /// Minimum latency of a cache hit
    pub cache_hit_delay: Duration,
    /// Interval between background sweeps of stale cache entries
    pub cleanup_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Interval between alert summary refreshes
    pub alert_poll_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - API base URL (default: http://127.0.0.1:8000/api/)
    /// - `API_TOKEN` - Bearer token (default: none, session cookie only)
    /// - `CACHE_DEFAULT_TTL_MS` - Default cache TTL in milliseconds (default: 1200000)
    /// - `CACHE_HIT_DELAY_MS` - Minimum cache hit latency in milliseconds (default: 120)
    /// - `CLEANUP_INTERVAL` - Cache sweep frequency in seconds (default: 60)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `ALERT_POLL_INTERVAL` - Alert summary refresh in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            api_token: env::var("API_TOKEN").ok().filter(|v| !v.trim().is_empty()),
            cache_default_ttl: parse_env("CACHE_DEFAULT_TTL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_default_ttl),
            cache_hit_delay: parse_env("CACHE_HIT_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_hit_delay),
            cleanup_interval: parse_env("CLEANUP_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cleanup_interval),
            request_timeout: parse_env("REQUEST_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            alert_poll_interval: parse_env("ALERT_POLL_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.alert_poll_interval),
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            cache_default_ttl: DEFAULT_TTL,
            cache_hit_delay: DEFAULT_HIT_DELAY,
            cleanup_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            alert_poll_interval: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000/api/");
        assert!(config.api_token.is_none());
        assert_eq!(config.cache_default_ttl, Duration::from_millis(1_200_000));
        assert_eq!(config.cache_hit_delay, Duration::from_millis(120));
        assert_eq!(config.cleanup_interval, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.alert_poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "API_BASE_URL",
            "API_TOKEN",
            "CACHE_DEFAULT_TTL_MS",
            "CACHE_HIT_DELAY_MS",
            "CLEANUP_INTERVAL",
            "REQUEST_TIMEOUT",
            "ALERT_POLL_INTERVAL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.cache_default_ttl, DEFAULT_TTL);
        assert_eq!(config.cache_hit_delay, DEFAULT_HIT_DELAY);
    }
}
