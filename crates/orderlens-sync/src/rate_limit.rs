//! Pacing and time seams for the sync loop.
//!
//! The pagination loop waits a fixed delay between page requests regardless
//! of how the upstream responded; there is no retry or backoff. Both the
//! delay and the wall clock are injected so tests can drive a full sync
//! without real time passing.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Suspends the sync loop between page requests.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Source of the completion timestamp recorded with each snapshot.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
