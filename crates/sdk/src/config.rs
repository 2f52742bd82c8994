use std::str::FromStr;
use std::time::Duration;

use openfactory_ksqldb::client::KsqlConfig;
use openfactory_ksqldb::retry::RetryConfig;

pub const DEFAULT_KSQLDB_URL: &str = "http://localhost:8088";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// ksqlDB REST endpoint.
    pub ksqldb_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries for transient registry failures.
    pub max_retries: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            ksqldb_url: DEFAULT_KSQLDB_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SdkConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `KSQLDB_URL`          | `http://localhost:8088` |
    /// | `KSQLDB_TIMEOUT_SECS` | `30`                    |
    /// | `KSQLDB_MAX_RETRIES`  | `3`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ksqldb_url = lookup("KSQLDB_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_KSQLDB_URL.to_string());

        let timeout_secs = parse_var(&lookup, "KSQLDB_TIMEOUT_SECS", "u64", DEFAULT_TIMEOUT_SECS)?;
        let max_retries = parse_var(&lookup, "KSQLDB_MAX_RETRIES", "u32", DEFAULT_MAX_RETRIES)?;

        Ok(Self {
            ksqldb_url,
            timeout_secs,
            max_retries,
        })
    }

    /// Replace the ksqlDB URL when one was given on the command line.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.ksqldb_url = url;
        }
        self
    }

    pub fn ksql_config(&self) -> KsqlConfig {
        KsqlConfig {
            url: self.ksqldb_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryConfig::with_max_retries(self.max_retries),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SdkConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SdkConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = SdkConfig::from_lookup(lookup_from(&[
            ("KSQLDB_URL", "http://ksqldb-server:8088"),
            ("KSQLDB_TIMEOUT_SECS", "5"),
            ("KSQLDB_MAX_RETRIES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.ksqldb_url, "http://ksqldb-server:8088");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = SdkConfig::from_lookup(lookup_from(&[("KSQLDB_URL", "  ")])).unwrap();
        assert_eq!(config.ksqldb_url, DEFAULT_KSQLDB_URL);
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = SdkConfig::from_lookup(lookup_from(&[("KSQLDB_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_matches!(
            err,
            ConfigError::Invalid {
                name: "KSQLDB_TIMEOUT_SECS",
                ..
            }
        );
    }

    #[test]
    fn url_override_wins() {
        let config = SdkConfig::default().with_url_override(Some("http://other:8088".into()));
        assert_eq!(config.ksqldb_url, "http://other:8088");
        let config = SdkConfig::default().with_url_override(None);
        assert_eq!(config.ksqldb_url, DEFAULT_KSQLDB_URL);
    }

    #[test]
    fn ksql_config_carries_timeout_and_retries() {
        let config = SdkConfig {
            ksqldb_url: "http://k:8088".into(),
            timeout_secs: 7,
            max_retries: 1,
        }
        .ksql_config();
        assert_eq!(config.url, "http://k:8088");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.retry.max_retries, 1);
    }
}
