//! Cricket data API client.
//!
//! Issues HTTP GET queries against the public YQL query endpoint and
//! parses the JSON payload. One live fetch per query; failures are
//! classified into the `DataError` taxonomy and never retried.

use super::CricketDataSource;
use crate::error::DataError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default query endpoint.
pub const DEFAULT_BASE_URL: &str = "http://query.yahooapis.com/v1/public/yql";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// YQL environment store token required by the public endpoint.
const YQL_ENV: &str = "store://0TxIGQMQbObzvU4Apia0V0";

/// Query selecting every ongoing series.
const ONGOING_SERIES_QUERY: &str = "select * from cricket.series.ongoing";

#[derive(Debug, Clone)]
pub struct CricketApiClient {
    client: Client,
    base_url: String,
}

impl CricketApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create with a custom endpoint and timeout (configuration and tests).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }

    /// Perform a single GET for `query`, buffer the body and parse it.
    ///
    /// Errors: network-level failure → `Transport`; non-JSON body →
    /// `Parse`; a payload carrying the API's own `error` envelope →
    /// `Parse` with the upstream message.
    pub async fn fetch_json(&self, query: &str) -> Result<Value, DataError> {
        debug!("fetching cricket data: {}", query);

        let response = self
            .client
            .get(&self.base_url)
            // `callback=` suppresses the endpoint's JSONP wrapping.
            .query(&[
                ("q", query),
                ("format", "json"),
                ("env", YQL_ENV),
                ("callback", ""),
            ])
            .send()
            .await
            .map_err(DataError::transport)?;

        let body = response.text().await.map_err(DataError::transport)?;
        let payload = parse_payload(&body)?;

        Ok(payload)
    }
}

impl Default for CricketApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CricketDataSource for CricketApiClient {
    async fn ongoing_series(&self) -> Result<Value, DataError> {
        self.fetch_json(ONGOING_SERIES_QUERY).await.map_err(|e| {
            error!("ongoing series fetch failed: {}", e);
            e
        })
    }

    async fn team(&self, name: &str) -> Result<Value, DataError> {
        // The name lands inside the YQL string literal; URL escaping of the
        // whole query is handled by reqwest's query-parameter encoding.
        let query = format!("select * from cricket.teams WHERE TeamName=\"{}\"", name);
        self.fetch_json(&query).await.map_err(|e| {
            error!("team fetch failed for {}: {}", name, e);
            e
        })
    }
}

/// Parse a response body into a payload, rejecting the API's error envelope.
fn parse_payload(body: &str) -> Result<Value, DataError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if let Some(err) = payload.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unspecified upstream error");
        return Err(DataError::Parse(format!("upstream error: {}", message)));
    }

    Ok(payload)
}
