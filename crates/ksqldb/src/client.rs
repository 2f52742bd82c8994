//! REST client for a ksqlDB server.
//!
//! Wraps the `/info` and `/query` endpoints using [`reqwest`]. Pull
//! queries are retried with exponential backoff when the server cannot be
//! reached or answers with a 5xx status.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::response::{parse_query_response, KsqlErrorBody, QueryResult};
use crate::retry::{next_delay, RetryConfig};

const KSQL_MEDIA_TYPE: &str = "application/vnd.ksql.v1+json";

/// Connection settings for one ksqlDB server.
#[derive(Debug, Clone)]
pub struct KsqlConfig {
    /// Base HTTP URL, e.g. `http://localhost:8088`.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl KsqlConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

/// HTTP client for a single ksqlDB server.
#[derive(Debug, Clone)]
pub struct KsqlClient {
    client: reqwest::Client,
    url: String,
    retry: RetryConfig,
}

/// Server metadata returned by `GET /info`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    #[serde(rename = "KsqlServerInfo")]
    pub server: KsqlServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KsqlServerInfo {
    pub version: String,
    #[serde(default)]
    pub ksql_service_id: Option<String>,
    #[serde(default)]
    pub server_status: Option<String>,
}

/// Errors from the ksqlDB REST layer.
#[derive(Debug, thiserror::Error)]
pub enum KsqlError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// ksqlDB returned a non-2xx status without a recognisable error body.
    #[error("ksqlDB API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// ksqlDB rejected or failed the statement.
    #[error("ksqlDB statement error {code}: {message}")]
    Statement { code: i64, message: String },

    /// The response body could not be decoded.
    #[error("Malformed ksqlDB response: {0}")]
    Decode(String),
}

impl KsqlError {
    /// Whether the failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::Statement { .. } | Self::Decode(_) => false,
        }
    }
}

impl KsqlClient {
    /// Create a client without contacting the server.
    pub fn new(config: KsqlConfig) -> Result<Self, KsqlError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(client, config.url, config.retry))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: String, retry: RetryConfig) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// Create a client and verify the server answers `GET /info`.
    pub async fn connect(config: KsqlConfig) -> Result<Self, KsqlError> {
        let client = Self::new(config)?;
        let info = client.info().await?;
        tracing::info!(
            url = %client.url,
            version = %info.server.version,
            status = info.server.server_status.as_deref().unwrap_or("unknown"),
            "Connected to ksqlDB",
        );
        Ok(client)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch server metadata.
    pub async fn info(&self) -> Result<ServerInfo, KsqlError> {
        let response = self
            .client
            .get(format!("{}/info", self.url))
            .header(ACCEPT, KSQL_MEDIA_TYPE)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<ServerInfo>().await?)
    }

    /// Run a pull query, retrying transient failures.
    pub async fn pull_query(&self, statement: &str) -> Result<QueryResult, KsqlError> {
        let mut delay = self.retry.initial_delay;
        let mut attempt = 0u32;

        loop {
            tracing::debug!(statement, attempt, "Running ksqlDB pull query");

            match self.pull_query_once(statement).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "ksqlDB query failed, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, &self.retry);
                }
                Err(e) => return Err(e),
            }
        }
    }

    // ---- private helpers ----

    async fn pull_query_once(&self, statement: &str) -> Result<QueryResult, KsqlError> {
        let body = serde_json::json!({
            "ksql": statement,
            "streamsProperties": {},
        });

        let response = self
            .client
            .post(format!("{}/query", self.url))
            .header(ACCEPT, KSQL_MEDIA_TYPE)
            .header(CONTENT_TYPE, KSQL_MEDIA_TYPE)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        parse_query_response(&text)
    }

    /// Ensure the response has a success status code. On failure the body
    /// is decoded as a ksqlDB error when possible.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, KsqlError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(error_from_body(status.as_u16(), body))
    }
}

/// Classify a non-2xx response. Client errors with a ksqlDB error body
/// become [`KsqlError::Statement`]; everything else keeps the raw body.
fn error_from_body(status: u16, body: String) -> KsqlError {
    if status < 500 {
        if let Ok(err) = serde_json::from_str::<KsqlErrorBody>(&body) {
            return KsqlError::Statement {
                code: err.error_code,
                message: err.message,
            };
        }
    }
    KsqlError::Api { status, body }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn statement_error_body_is_decoded() {
        let body = r#"{"@type":"statement_error","error_code":40001,"message":"Table 'ASSETS' does not exist."}"#;
        let err = error_from_body(400, body.to_string());
        assert_matches!(err, KsqlError::Statement { code: 40001, .. });
        assert!(!err.is_transient());
    }

    #[test]
    fn server_error_keeps_raw_body_and_is_transient() {
        let err = error_from_body(503, "unavailable".to_string());
        assert_matches!(err, KsqlError::Api { status: 503, .. });
        assert!(err.is_transient());
    }

    #[test]
    fn unparseable_client_error_is_api_error() {
        let err = error_from_body(404, "<html>".to_string());
        assert_matches!(err, KsqlError::Api { status: 404, ref body } if body == "<html>");
        assert!(!err.is_transient());
    }

    #[test]
    fn decode_errors_are_not_retried() {
        assert!(!KsqlError::Decode("bad".into()).is_transient());
    }

    #[test]
    fn server_info_deserializes() {
        let body = r#"{"KsqlServerInfo":{"version":"0.29.0","kafkaClusterId":"abc","ksqlServiceId":"default_","serverStatus":"RUNNING"}}"#;
        let info: ServerInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.server.version, "0.29.0");
        assert_eq!(info.server.server_status.as_deref(), Some("RUNNING"));
    }

    #[test]
    fn with_client_trims_trailing_slash() {
        let client = KsqlClient::with_client(
            reqwest::Client::new(),
            "http://localhost:8088/".to_string(),
            RetryConfig::default(),
        );
        assert_eq!(client.url(), "http://localhost:8088");
    }

    #[tokio::test]
    async fn unreachable_server_fails_after_retries() {
        let config = KsqlConfig {
            url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            retry: RetryConfig {
                max_retries: 1,
                initial_delay: Duration::from_millis(1),
                ..Default::default()
            },
        };
        let client = KsqlClient::new(config).unwrap();
        let err = client.pull_query("SELECT 1;").await.unwrap_err();
        assert_matches!(err, KsqlError::Request(_));
    }
}
