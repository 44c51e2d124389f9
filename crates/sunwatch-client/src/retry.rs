//! Fixed retry policy for sunrise lookups.
//!
//! The upstream service sometimes answers `OK` with a zeroed record, or
//! `UNKNOWN_ERROR`, for requests that succeed moments later. Both are retried
//! up to [`MAX_RETRIES`] times with a constant [`RETRY_DELAY`] between
//! attempts. `INVALID_REQUEST`, `INVALID_DATE` and unrecognised statuses are
//! final on first sight.
//!
//! The policy is expressed as a pure transition, [`classify`], and a small
//! driver, [`fetch_with_retry`], that sleeps and re-issues the request.

use std::future::Future;
use std::time::Duration;

use crate::error::SunriseError;
use crate::types::{ApiResponse, ApiStatus, Coordinate, SunriseRecord};

/// Retries allowed after the first attempt.
pub const MAX_RETRIES: u32 = 5;

/// Constant pause before each retry.
pub const RETRY_DELAY: Duration = Duration::from_millis(10);

/// Where one lookup stands after an attempt has been evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded(SunriseRecord),
    /// Sleep for `delay`, then send retry number `retry` (1-based).
    RetryScheduled { retry: u32, delay: Duration },
    FatallyFailed {
        status: ApiStatus,
        day_length: Option<u64>,
    },
    ExhaustedRetries {
        status: ApiStatus,
        day_length: Option<u64>,
    },
}

/// Decides what follows `response`, given that `retries_so_far` retries have
/// already been spent.
#[must_use]
pub fn classify(retries_so_far: u32, response: ApiResponse) -> AttemptOutcome {
    let day_length = response.day_length();
    match (response.status, response.record) {
        (ApiStatus::Ok, Some(record)) if record.day_length != 0 => {
            AttemptOutcome::Succeeded(record)
        }
        (status @ (ApiStatus::Ok | ApiStatus::UnknownError), _) => {
            if retries_so_far < MAX_RETRIES {
                AttemptOutcome::RetryScheduled {
                    retry: retries_so_far + 1,
                    delay: RETRY_DELAY,
                }
            } else {
                AttemptOutcome::ExhaustedRetries { status, day_length }
            }
        }
        (status, _) => AttemptOutcome::FatallyFailed { status, day_length },
    }
}

/// Runs `operation` until [`classify`] reaches a terminal outcome.
///
/// Attempts are strictly sequential. Errors from `operation` itself
/// (network failures, undecodable bodies) are returned immediately.
///
/// # Errors
///
/// - [`SunriseError::FatalApi`] for a non-retriable status.
/// - [`SunriseError::ExhaustedRetries`] once [`MAX_RETRIES`] retries have
///   all come back transient.
/// - Any error produced by `operation`.
pub async fn fetch_with_retry<F, Fut>(
    coordinate: &Coordinate,
    mut operation: F,
) -> Result<SunriseRecord, SunriseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ApiResponse, SunriseError>>,
{
    let mut retries = 0u32;
    loop {
        let response = operation().await?;
        let status = response.status;
        let day_length = response.day_length();
        match classify(retries, response) {
            AttemptOutcome::Succeeded(record) => return Ok(record),
            AttemptOutcome::RetryScheduled { retry, delay } => {
                tracing::warn!(
                    %coordinate,
                    %status,
                    ?day_length,
                    retry,
                    max_retries = MAX_RETRIES,
                    "transient sunrise API response, retrying"
                );
                tokio::time::sleep(delay).await;
                retries = retry;
            }
            AttemptOutcome::FatallyFailed { status, day_length } => {
                return Err(SunriseError::FatalApi { status, day_length });
            }
            AttemptOutcome::ExhaustedRetries { status, day_length } => {
                return Err(SunriseError::ExhaustedRetries {
                    retries,
                    status,
                    day_length,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
