//! Sunrise-sunset API request and response types.
//!
//! The API wraps every response in a `{"status": "...", "results": ...}`
//! envelope. On success `results` is an object of timestamps; on failure it is
//! an empty string, so [`ApiEnvelope`] keeps it as raw JSON until the status
//! is known.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic point to query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether latitude is in `[-90, 90]` and longitude in `[-180, 180]`.
    ///
    /// Out-of-range points are still sent as-is; the API answers them with
    /// `INVALID_REQUEST`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.latitude, self.longitude)
    }
}

/// The `status` string of the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Ok,
    InvalidRequest,
    InvalidDate,
    UnknownError,
    /// Any status this client does not know about (e.g. `INVALID_TZID`).
    #[serde(other)]
    Unrecognized,
}

impl ApiStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidDate => "INVALID_DATE",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sun event times for one coordinate, as returned with `formatted=0`.
///
/// Timestamps are parsed into UTC instants on decode, so comparisons between
/// records never depend on the textual form the API used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SunriseRecord {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    /// Seconds of daylight. Zero marks a bogus response from the upstream
    /// service even when `status` is `OK`.
    pub day_length: u64,
    pub civil_twilight_begin: DateTime<Utc>,
    pub civil_twilight_end: DateTime<Utc>,
    pub nautical_twilight_begin: DateTime<Utc>,
    pub nautical_twilight_end: DateTime<Utc>,
    pub astronomical_twilight_begin: DateTime<Utc>,
    pub astronomical_twilight_end: DateTime<Utc>,
}

/// Raw response envelope, before `results` is interpreted.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub status: ApiStatus,
    #[serde(default)]
    pub results: serde_json::Value,
}

/// A decoded API response.
///
/// `record` is only populated when `status` is `OK`, and may still be
/// semantically invalid (`day_length == 0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: ApiStatus,
    pub record: Option<SunriseRecord>,
}

impl ApiResponse {
    /// The `day_length` carried by the record, if any.
    #[must_use]
    pub fn day_length(&self) -> Option<u64> {
        self.record.as_ref().map(|r| r.day_length)
    }
}
