//! Bounded-concurrency client for the sunrise-sunset API.
//!
//! [`SunriseClient::fetch`] issues one request under a shared
//! [`RequestLimiter`]; [`retry`] turns API statuses into retry decisions;
//! [`batch`] fans a set of coordinates out and [`earliest`] reduces the
//! results.

pub mod batch;
pub mod client;
pub mod error;
pub mod limiter;
pub mod reduce;
pub mod retry;
pub mod types;

pub use batch::run_batch;
pub use client::{SunriseClient, DEFAULT_BASE_URL};
pub use error::SunriseError;
pub use limiter::{RequestLimiter, MAX_IN_FLIGHT};
pub use reduce::earliest;
pub use retry::{classify, fetch_with_retry, AttemptOutcome, MAX_RETRIES, RETRY_DELAY};
pub use types::{ApiResponse, ApiStatus, Coordinate, SunriseRecord};
