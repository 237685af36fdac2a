//! Configuration Module
//!
//! Handles loading the client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache expiry interval (and reaper tick period) in seconds
    pub cache_interval: u64,
    /// Base URL of the PokeAPI, without a trailing slash
    pub base_url: String,
    /// Per-request HTTP timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_SECS` - Cache expiry interval in seconds (default: 300)
    /// - `POKEAPI_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_interval),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            http_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// Cache interval as a `Duration`.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// HTTP timeout as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 300,
            base_url: "https://pokeapi.co/api/v2".to_string(),
            http_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_interval, 300);
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout, 10);
        assert_eq!(config.cache_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env vars so parallel tests don't race
        env::remove_var("CACHE_INTERVAL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("HTTP_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, 300);
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout, 10);

        env::set_var("CACHE_INTERVAL_SECS", "not-a-number");
        env::set_var("POKEAPI_BASE_URL", "http://localhost:8080/api/v2/");
        env::set_var("HTTP_TIMEOUT_SECS", "3");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, 300);
        assert_eq!(config.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.http_timeout(), Duration::from_secs(3));

        env::remove_var("CACHE_INTERVAL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("HTTP_TIMEOUT_SECS");
    }
}
