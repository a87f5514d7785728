//! Sync orchestration: probe, paginate, normalize, persist, swap.
//!
//! A sync either replaces the whole snapshot or leaves the previous one in
//! place. Nothing is written to the store or published in memory until every
//! page has been fetched and normalized.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use orderlens_core::OrderSnapshot;
use orderlens_store::OrderStore;

use crate::error::SyncError;
use crate::normalize::normalize_orders;
use crate::pagination::{EndReason, PaginationController, PaginationPolicy};
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::rate_limit::{Clock, Delay, SystemClock, TokioDelay};
use crate::source::{OrderSource, ProbeOutcome};

/// Counts reported after a successful sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub order_count: usize,
    pub pages_fetched: u32,
    /// Records stored with a defaulted date or cost.
    pub degraded_records: usize,
    pub end: EndReason,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// A new snapshot was persisted and is now current.
    Synced(SyncSummary),
    /// Pagination found no orders at all. The previous snapshot, if any, is
    /// kept untouched.
    NoData { pages_fetched: u32 },
}

/// Owns the current [`OrderSnapshot`] and replaces it on each sync.
pub struct SyncEngine<S, T, D = TokioDelay, C = SystemClock> {
    source: S,
    store: T,
    delay: D,
    clock: C,
    policy: PaginationPolicy,
    current: RwLock<Option<Arc<OrderSnapshot>>>,
}

impl<S, T> SyncEngine<S, T>
where
    S: OrderSource,
    T: OrderStore,
{
    #[must_use]
    pub fn new(source: S, store: T, policy: PaginationPolicy) -> Self {
        Self {
            source,
            store,
            delay: TokioDelay,
            clock: SystemClock,
            policy,
            current: RwLock::new(None),
        }
    }
}

impl<S, T, D, C> SyncEngine<S, T, D, C>
where
    S: OrderSource,
    T: OrderStore,
    D: Delay,
    C: Clock,
{
    /// Replaces the inter-page delay implementation.
    #[must_use]
    pub fn with_delay<D2: Delay>(self, delay: D2) -> SyncEngine<S, T, D2, C> {
        SyncEngine {
            source: self.source,
            store: self.store,
            delay,
            clock: self.clock,
            policy: self.policy,
            current: self.current,
        }
    }

    /// Replaces the clock used to stamp `last_updated`.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SyncEngine<S, T, D, C2> {
        SyncEngine {
            source: self.source,
            store: self.store,
            delay: self.delay,
            clock,
            policy: self.policy,
            current: self.current,
        }
    }

    /// The snapshot currently held in memory.
    ///
    /// Readers get a shared handle; a concurrent sync swaps in a new value
    /// without affecting handles already taken.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<OrderSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads the persisted snapshot into memory.
    ///
    /// Returns `Ok(None)` and leaves memory untouched when nothing has been
    /// stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the stored document cannot be read.
    pub fn restore(&self) -> Result<Option<Arc<OrderSnapshot>>, SyncError> {
        let Some(snapshot) = self.store.load()? else {
            tracing::debug!("no stored snapshot to restore");
            return Ok(None);
        };

        tracing::info!(
            orders = snapshot.order_count(),
            last_updated = %snapshot.last_updated,
            "restored stored snapshot"
        );
        let snapshot = Arc::new(snapshot);
        self.publish(Arc::clone(&snapshot));
        Ok(Some(snapshot))
    }

    /// Runs one full sync.
    ///
    /// # Errors
    ///
    /// - [`SyncError::NotAuthenticated`] when the probe detects a missing
    ///   session; no page is requested.
    /// - Any page fetch failure or [`SyncError::PaginationLimit`]; partial
    ///   results are discarded.
    /// - [`SyncError::Store`] when the new snapshot cannot be persisted; the
    ///   in-memory snapshot is then left unchanged.
    pub async fn sync<P>(&self, progress: &P) -> Result<SyncOutcome, SyncError>
    where
        P: ProgressSink + ?Sized,
    {
        progress.report(ProgressUpdate::connecting());

        match self.source.probe().await {
            Ok(ProbeOutcome::NotAuthenticated { url }) => {
                tracing::warn!(%url, "session probe indicates the user is not logged in");
                return Err(SyncError::NotAuthenticated { url });
            }
            Ok(ProbeOutcome::Reachable { status }) => {
                tracing::debug!(status, "session probe passed");
            }
            Err(error) => {
                tracing::warn!(%error, "session probe failed; continuing with pagination");
            }
        }

        let outcome = PaginationController::new(
            &self.source,
            &self.delay,
            progress,
            self.policy.clone(),
        )
        .run()
        .await?;

        if outcome.orders.is_empty() {
            tracing::warn!(
                pages_fetched = outcome.pages_fetched,
                "sync found no orders; keeping previous snapshot"
            );
            return Ok(SyncOutcome::NoData {
                pages_fetched: outcome.pages_fetched,
            });
        }

        progress.report(ProgressUpdate::normalizing());
        let batch = normalize_orders(&outcome.orders);
        let snapshot = OrderSnapshot::new(batch.orders, self.clock.now());

        // One small local write per sync; see the `OrderStore` contract.
        self.store.save(&snapshot)?;

        let summary = SyncSummary {
            order_count: snapshot.order_count(),
            pages_fetched: outcome.pages_fetched,
            degraded_records: batch.degraded,
            end: outcome.end,
            last_updated: snapshot.last_updated,
        };
        self.publish(Arc::new(snapshot));
        progress.report(ProgressUpdate::complete());

        tracing::info!(
            orders = summary.order_count,
            pages = summary.pages_fetched,
            degraded = summary.degraded_records,
            end = ?summary.end,
            "sync complete"
        );
        Ok(SyncOutcome::Synced(summary))
    }

    fn publish(&self, snapshot: Arc<OrderSnapshot>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
