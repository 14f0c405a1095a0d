//! Configuration loading
//!
//! JSON files for the planner settings, calculation requests and rate
//! snapshots all go through [`read_json`] / [`parse_json`].

use bunkatsu_core::{Currency, RateTable};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Planner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Currency in which loss caps and reports are expressed
    #[serde(default = "default_settlement")]
    pub settlement: Currency,

    /// How long a fetched snapshot is served from cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Timeout applied to every rate fetch
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Snapshot served, flagged as degraded, when the feed fails
    #[serde(default)]
    pub fallback_rates: Option<RateTable>,
}

fn default_settlement() -> Currency {
    Currency::JPY
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_fetch_timeout_ms() -> u64 {
    3000
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            settlement: default_settlement(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            fallback_rates: None,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse_json(json)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_ttl_secs as i64)
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
        path: path.as_ref().display().to_string(),
        error: e.to_string(),
    })?;

    parse_json(&content)
}

/// Parse a JSON string
pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = PlannerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.settlement, Currency::JPY);
        assert_eq!(config.cache_ttl(), chrono::Duration::minutes(5));
        assert_eq!(config.fetch_timeout(), std::time::Duration::from_secs(3));
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "settlement": "USD",
            "cache_ttl_secs": 60,
            "fetch_timeout_ms": 500,
            "fallback_rates": { "usd_jpy": "148.0", "rates": { "EUR": "0.9" } }
        }"#;
        let config = PlannerConfig::from_json(json).unwrap();
        assert_eq!(config.settlement, Currency::USD);
        assert_eq!(config.cache_ttl_secs, 60);
        let fallback = config.fallback_rates.unwrap();
        assert_eq!(fallback.usd_jpy(), Some(dec!(148.0)));
        assert_eq!(fallback.raw(Currency::EUR), Some(dec!(0.9)));
    }

    #[test]
    fn test_parse_error() {
        let err = PlannerConfig::from_json(r#"{"settlement": "XXX"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::from_file("/nonexistent/bunkatsu.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
