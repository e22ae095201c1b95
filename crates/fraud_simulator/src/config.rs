// Rust guideline compliant 2026-02-27

//! Environment-provided connection settings for the InfluxDB sink.
//!
//! Read once at process entry and passed by value into the adapter. Every
//! variable is optional; missing ones fall back to local-development defaults.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Store endpoint.
pub const URL_VAR: &str = "INFLUXDB_URL";
/// API token.
pub const TOKEN_VAR: &str = "INFLUXDB_TOKEN";
/// Write organization.
pub const ORG_VAR: &str = "INFLUXDB_ORG";
/// Write bucket.
pub const BUCKET_VAR: &str = "INFLUXDB_BUCKET";
/// Optional per-request timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "INFLUXDB_TIMEOUT_MS";
/// Extra attempts for a transient write failure.
pub const RETRY_ATTEMPTS_VAR: &str = "INFLUXDB_RETRY_ATTEMPTS";
/// Base pause between retries in milliseconds.
pub const RETRY_BACKOFF_VAR: &str = "INFLUXDB_RETRY_BACKOFF_MS";

const DEFAULT_URL: &str = "http://localhost:8086";
const DEFAULT_TOKEN: &str = "my-super-secret-auth-token";
const DEFAULT_ORG: &str = "fintech_org";
const DEFAULT_BUCKET: &str = "fraud_bucket";

/// Connection settings for [`InfluxSink`](crate::adapters::influx_sink::InfluxSink).
#[derive(Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Base URL, e.g. `http://localhost:8086`.
    pub url: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: String,
    /// Organization namespace.
    pub org: String,
    /// Target bucket.
    pub bucket: String,
    /// Request timeout. `None` waits as long as the store takes.
    pub timeout: Option<Duration>,
    /// Extra attempts for a transient write failure. `0` disables retry.
    pub retry_attempts: u32,
    /// Base pause between retries. `None` keeps the simulator default.
    pub retry_backoff: Option<Duration>,
}

impl SinkConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, applying defaults for missing keys.
    ///
    /// Unparsable numeric values are ignored with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        Self {
            url: get(URL_VAR, DEFAULT_URL),
            token: get(TOKEN_VAR, DEFAULT_TOKEN),
            org: get(ORG_VAR, DEFAULT_ORG),
            bucket: get(BUCKET_VAR, DEFAULT_BUCKET),
            timeout: parse_var(&lookup, TIMEOUT_VAR).map(Duration::from_millis),
            retry_attempts: parse_var(&lookup, RETRY_ATTEMPTS_VAR).unwrap_or(0),
            retry_backoff: parse_var(&lookup, RETRY_BACKOFF_VAR).map(Duration::from_millis),
        }
    }
}

/// Parse `key` when present; `None` (with a warning) when it does not parse.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("config.var.ignored: {key}={raw:?} error={e}");
            None
        }
    }
}

// Token is a credential; keep it out of logs.
impl fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_backoff", &self.retry_backoff)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SinkConfig::from_lookup(|_| None);
        assert_eq!(config.url, "http://localhost:8086");
        assert_eq!(config.token, "my-super-secret-auth-token");
        assert_eq!(config.org, "fintech_org");
        assert_eq!(config.bucket, "fraud_bucket");
        assert_eq!(config.timeout, None);
        assert_eq!(config.retry_attempts, 0);
        assert_eq!(config.retry_backoff, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = SinkConfig::from_lookup(lookup_from(&[
            (URL_VAR, "http://influx:9999"),
            (TOKEN_VAR, "t0k3n"),
            (ORG_VAR, "acme"),
            (BUCKET_VAR, "tx"),
            (TIMEOUT_VAR, "2500"),
            (RETRY_ATTEMPTS_VAR, "3"),
            (RETRY_BACKOFF_VAR, " 750 "),
        ]));
        assert_eq!(config.url, "http://influx:9999");
        assert_eq!(config.token, "t0k3n");
        assert_eq!(config.org, "acme");
        assert_eq!(config.bucket, "tx");
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff, Some(Duration::from_millis(750)));
    }

    #[test]
    fn bad_timeout_is_ignored() {
        let config = SinkConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn bad_retry_values_fall_back() {
        let config = SinkConfig::from_lookup(lookup_from(&[
            (RETRY_ATTEMPTS_VAR, "-1"),
            (RETRY_BACKOFF_VAR, "fast"),
        ]));
        assert_eq!(config.retry_attempts, 0);
        assert_eq!(config.retry_backoff, None);
    }

    #[test]
    fn debug_redacts_token() {
        let config = SinkConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "hunter2")]));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"), "token leaked: {rendered}");
        assert!(rendered.contains("<redacted>"));
    }
}
