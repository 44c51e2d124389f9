//! Fan-out of one retrying lookup per coordinate.

use std::future::Future;

use futures::future::try_join_all;

use crate::client::SunriseClient;
use crate::error::SunriseError;
use crate::retry::fetch_with_retry;
use crate::types::{Coordinate, SunriseRecord};

/// Runs `lookup` for every coordinate concurrently and returns the records in
/// input order.
///
/// Network concurrency is bounded by whatever limiter `lookup` goes through,
/// not here. The first failure ends the batch: the remaining lookups are
/// dropped, which cancels them at their next await point and hands their
/// limiter slots back.
///
/// # Errors
///
/// Returns the first error produced by any lookup.
pub async fn run_batch<'a, F, Fut>(
    coordinates: &'a [Coordinate],
    lookup: F,
) -> Result<Vec<SunriseRecord>, SunriseError>
where
    F: FnMut(&'a Coordinate) -> Fut,
    Fut: Future<Output = Result<SunriseRecord, SunriseError>>,
{
    try_join_all(coordinates.iter().map(lookup)).await
}

impl SunriseClient {
    /// Looks up one coordinate through the fixed retry policy.
    ///
    /// # Errors
    ///
    /// See [`fetch_with_retry`] and [`SunriseClient::fetch`].
    pub async fn fetch_with_retry(
        &self,
        coordinate: &Coordinate,
    ) -> Result<SunriseRecord, SunriseError> {
        fetch_with_retry(coordinate, || self.fetch(coordinate)).await
    }

    /// Looks up every coordinate, failing the whole batch on the first
    /// unrecoverable lookup.
    ///
    /// # Errors
    ///
    /// Returns the first [`SunriseError`] raised by any coordinate.
    pub async fn run_batch(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<Vec<SunriseRecord>, SunriseError> {
        tracing::info!(
            coordinates = coordinates.len(),
            "fetching sunrise data for batch"
        );
        let records = run_batch(coordinates, |c| self.fetch_with_retry(c)).await?;
        tracing::info!(records = records.len(), "sunrise batch complete");
        Ok(records)
    }
}
