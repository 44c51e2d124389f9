//! HTTP client for the sunrise-sunset JSON API.
//!
//! Wraps `reqwest` with the query encoding the API expects, keep-alive
//! connection reuse and a shared [`RequestLimiter`] that caps the number of
//! requests in flight. The fetcher only decodes the envelope; interpreting
//! `status` is left to [`crate::retry`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SunriseError;
use crate::limiter::{RequestLimiter, MAX_IN_FLIGHT};
use crate::types::{ApiEnvelope, ApiResponse, ApiStatus, Coordinate, SunriseRecord};

pub const DEFAULT_BASE_URL: &str = "https://api.sunrise-sunset.org/json";

const USER_AGENT: &str = "sunwatch/0.1 (earliest-sunrise)";

/// Client for the sunrise-sunset API.
///
/// Use [`SunriseClient::new`] for production or
/// [`SunriseClient::with_base_url`] to point at a mock server in tests.
/// Clones share the connection pool and the limiter.
#[derive(Debug, Clone)]
pub struct SunriseClient {
    client: Client,
    base_url: Url,
    limiter: RequestLimiter,
}

impl SunriseClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SunriseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, limiter: RequestLimiter) -> Result<Self, SunriseError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL, limiter)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SunriseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SunriseError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        base_url: &str,
        limiter: RequestLimiter,
    ) -> Result<Self, SunriseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(MAX_IN_FLIGHT)
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SunriseError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            limiter,
        })
    }

    /// Fetches and decodes the API response for one coordinate.
    ///
    /// Waits for a limiter slot first and holds it until the body is read.
    /// No retries happen here and `status` is not interpreted.
    ///
    /// # Errors
    ///
    /// - [`SunriseError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SunriseError::Deserialize`] if the body is not the expected JSON.
    /// - [`SunriseError::LimiterClosed`] if the limiter has been shut.
    pub async fn fetch(&self, coordinate: &Coordinate) -> Result<ApiResponse, SunriseError> {
        let url = self.build_url(coordinate);
        let body = self.limiter.run(self.request_json(&url)).await??;
        Self::decode(&url, body)
    }

    /// Builds the request URL: `lat` and `lng` with exactly seven fractional
    /// digits, and `formatted=0` so timestamps come back as ISO 8601 in UTC.
    pub(crate) fn build_url(&self, coordinate: &Coordinate) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &format!("{:.7}", coordinate.latitude))
            .append_pair("lng", &format!("{:.7}", coordinate.longitude))
            .append_pair("formatted", "0");
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SunriseError> {
        tracing::debug!(%url, "requesting sunrise data");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SunriseError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Splits the envelope and decodes `results` only when `status` is `OK`.
    fn decode(url: &Url, body: serde_json::Value) -> Result<ApiResponse, SunriseError> {
        let envelope: ApiEnvelope =
            serde_json::from_value(body).map_err(|e| SunriseError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let record = if envelope.status == ApiStatus::Ok {
            let record: SunriseRecord = serde_json::from_value(envelope.results).map_err(|e| {
                SunriseError::Deserialize {
                    context: format!("results of {url}"),
                    source: e,
                }
            })?;
            Some(record)
        } else {
            None
        };

        Ok(ApiResponse {
            status: envelope.status,
            record,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
