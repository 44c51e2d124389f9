//! Admission control for outbound requests.
//!
//! [`RequestLimiter`] is a cloneable handle over a shared semaphore. Every
//! clone draws from the same pool of slots, so one limiter built at startup
//! and handed to each client caps the whole process, while tests can build
//! their own without leaking state between them.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::SunriseError;

/// Maximum number of requests allowed in flight at once.
pub const MAX_IN_FLIGHT: usize = 5;

#[derive(Debug, Clone)]
pub struct RequestLimiter {
    semaphore: Arc<Semaphore>,
}

impl RequestLimiter {
    /// Creates a limiter with `slots` concurrent permits (at least one).
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(slots.max(1))),
        }
    }

    /// Number of slots free right now.
    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a free slot, then drives `operation` to completion while
    /// holding it. The slot is released when the future finishes or is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SunriseError::LimiterClosed`] if the semaphore has been
    /// closed, without running `operation`.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, SunriseError>
    where
        F: Future<Output = T>,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| SunriseError::LimiterClosed)?;
        Ok(operation.await)
    }
}

impl Default for RequestLimiter {
    fn default() -> Self {
        Self::new(MAX_IN_FLIGHT)
    }
}
