//! Fetcher configuration.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Transport settings, usually a `[fetcher]` table in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Prefix for endpoint paths. Without it, paths are sent as-is.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Per-request timeout in seconds. `0` means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FetcherConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = FetcherConfig::parse(
            r#"
base_url = "https://api.example.com/v1"
timeout_secs = 10

[headers]
Authorization = "Bearer abc"
"#,
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.headers["Authorization"], "Bearer abc");
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = FetcherConfig::parse("timeout_secs = 0").unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(FetcherConfig::parse("").unwrap(), FetcherConfig::default());
    }

    #[test]
    fn invalid_config_is_parse_error() {
        let err = FetcherConfig::parse("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
