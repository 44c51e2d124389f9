use thiserror::Error;

use crate::types::ApiStatus;

/// Errors returned by the sunrise-sunset client.
#[derive(Debug, Error)]
pub enum SunriseError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API rejected the request outright; retrying cannot fix it.
    #[error("sunrise API returned {status} (day_length={})", fmt_day_length(.day_length))]
    FatalApi {
        status: ApiStatus,
        day_length: Option<u64>,
    },

    /// Every allowed retry was spent on transient responses.
    #[error(
        "sunrise API still returned {status} (day_length={}) after {retries} retries",
        fmt_day_length(.day_length)
    )]
    ExhaustedRetries {
        retries: u32,
        status: ApiStatus,
        day_length: Option<u64>,
    },

    #[error("request limiter is closed")]
    LimiterClosed,

    #[error("cannot pick the earliest sunrise from an empty result set")]
    EmptyInput,

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl SunriseError {
    /// `true` for transport-level failures: connection errors, non-2xx
    /// statuses and undecodable bodies.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Deserialize { .. })
    }
}

fn fmt_day_length(day_length: &Option<u64>) -> String {
    day_length.map_or_else(|| "n/a".to_owned(), |d| d.to_string())
}
