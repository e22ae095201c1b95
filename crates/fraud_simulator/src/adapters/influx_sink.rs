// Rust guideline compliant 2026-02-27

//! InfluxDB v2 adapter for the `Sink` port.
//!
//! Writes one line-protocol line per point to `/api/v2/write` via `reqwest`
//! and waits for the acknowledgement before returning. No batching and no
//! retry here; retry policy belongs to the simulator loop.
//!
//! # Status mapping
//!
//! | response | `SinkError` |
//! |---|---|
//! | 2xx | -- (`Ok`) |
//! | 401, 403 | `Unauthorized` |
//! | 404 | `NotFound` (unknown org or bucket) |
//! | other | `Rejected` |
//! | no response | `Transport` |

use domain::{Point, Sink, SinkError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};

use super::line_protocol;
use crate::config::SinkConfig;

/// Errors raised while building an [`InfluxSink`].
#[derive(Debug, thiserror::Error)]
pub enum InfluxSinkError {
    /// The configured base URL cannot be parsed.
    #[error("invalid InfluxDB url {url:?}: {reason}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The HTTP client could not be constructed.
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// `Sink` adapter that posts line protocol to an InfluxDB v2 server.
///
/// Owns one pooled HTTP client for its whole lifetime; [`Sink::close`]
/// drops it.
#[derive(Debug)]
pub struct InfluxSink {
    client: Client,
    /// Fully-qualified write endpoint, including `org`, `bucket` and `precision`.
    write_url: Url,
    token: String,
}

impl InfluxSink {
    /// Build a sink with a default `reqwest` client honouring `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`InfluxSinkError`] when the URL is invalid or the client
    /// cannot be built.
    pub fn new(config: SinkConfig) -> Result<Self, InfluxSinkError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(config, builder.build()?)
    }

    /// Build a sink around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`InfluxSinkError::InvalidUrl`] when the URL is invalid.
    pub fn with_client(config: SinkConfig, client: Client) -> Result<Self, InfluxSinkError> {
        let endpoint = format!("{}/api/v2/write", config.url.trim_end_matches('/'));
        let mut write_url = Url::parse(&endpoint).map_err(|e| InfluxSinkError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;
        write_url
            .query_pairs_mut()
            .append_pair("org", &config.org)
            .append_pair("bucket", &config.bucket)
            .append_pair("precision", "ns");
        tracing::info!("influx_sink.opened: endpoint={write_url}");
        Ok(Self {
            client,
            write_url,
            token: config.token,
        })
    }
}

impl Sink for InfluxSink {
    async fn write(&self, point: &Point) -> Result<(), SinkError> {
        let body = line_protocol::encode(point);
        tracing::trace!("influx_sink.write: {body}");

        let response = self
            .client
            .post(self.write_url.clone())
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| SinkError::Transport { reason: e.to_string() })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let reason = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            code @ (401 | 403) => SinkError::Unauthorized { status: code },
            404 => SinkError::NotFound { reason },
            code => SinkError::Rejected { status: code, reason },
        })
    }

    async fn close(self) {
        tracing::info!("influx_sink.closed: endpoint={}", self.write_url);
    }

    fn name(&self) -> &str {
        "InfluxDB"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
