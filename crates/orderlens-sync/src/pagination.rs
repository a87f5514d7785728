//! Page-number pagination over the order history endpoint.
//!
//! The upstream gives no reliable end-of-data marker for its map-shaped
//! responses, so termination is decided per page:
//!
//! | Condition after fetching page `n`            | Next state                  |
//! |----------------------------------------------|-----------------------------|
//! | fetch or decode failed                        | `Failed`                    |
//! | no orders extracted, `n == 1`                | `Done(EmptyFirstPage)`      |
//! | no orders extracted, `n > 1`                 | `Done(EmptyPage)`           |
//! | `totalPages` hint present and `n >= hint`    | `Done(TotalPagesReached)`   |
//! | no hint and fewer than `min_page_size` orders | `Done(ShortPage)`           |
//! | otherwise                                    | `HasMore` → delay → `n + 1` |
//!
//! Pages are fetched strictly one at a time, with an unconditional delay
//! between consecutive requests. `max_pages` only guards the heuristic path:
//! a page within the upstream's own `totalPages` is always fetched.

use std::time::Duration;

use orderlens_core::AppConfig;

use crate::error::SyncError;
use crate::extract::{classify, total_pages_hint};
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::rate_limit::Delay;
use crate::source::OrderSource;
use crate::types::RawOrder;

/// Tunables for the pagination loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPolicy {
    /// A page with fewer orders than this (and no `totalPages` hint) is
    /// taken as the last one.
    pub min_page_size: usize,
    /// Hard stop against an upstream that never runs out of pages. Only
    /// applies while no `totalPages` hint bounds the run.
    pub max_pages: u32,
    /// Wait between consecutive page requests.
    pub inter_page_delay: Duration,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            min_page_size: 5,
            max_pages: 200,
            inter_page_delay: Duration::from_secs(1),
        }
    }
}

impl PaginationPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            min_page_size: config.min_page_size,
            max_pages: config.max_pages,
            inter_page_delay: Duration::from_millis(config.inter_page_delay_ms),
        }
    }
}

/// Why pagination stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Page 1 held no orders: likely no session, or no order history.
    EmptyFirstPage,
    /// A later page held no orders.
    EmptyPage { page: u32 },
    TotalPagesReached { page: u32, total_pages: u32 },
    ShortPage { page: u32, count: usize },
}

#[derive(Debug)]
pub enum PageState {
    Fetching(u32),
    HasMore { next_page: u32 },
    Done(EndReason),
    Failed(SyncError),
}

impl PageState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PageState::Done(_) | PageState::Failed(_))
    }
}

/// Everything collected by a completed pagination run.
#[derive(Debug)]
pub struct PaginationOutcome {
    pub orders: Vec<RawOrder>,
    pub pages_fetched: u32,
    pub end: EndReason,
}

/// Drives the page state machine against an [`OrderSource`].
pub struct PaginationController<'a, S, D, P: ?Sized> {
    source: &'a S,
    delay: &'a D,
    progress: &'a P,
    policy: PaginationPolicy,
    state: PageState,
    orders: Vec<RawOrder>,
    pages_fetched: u32,
    total_pages: Option<u32>,
}

impl<'a, S, D, P> PaginationController<'a, S, D, P>
where
    S: OrderSource,
    D: Delay,
    P: ProgressSink + ?Sized,
{
    #[must_use]
    pub fn new(source: &'a S, delay: &'a D, progress: &'a P, policy: PaginationPolicy) -> Self {
        Self {
            source,
            delay,
            progress,
            policy,
            state: PageState::Fetching(1),
            orders: Vec::new(),
            pages_fetched: 0,
            total_pages: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Advances the state machine by one transition. Terminal states are
    /// returned unchanged.
    pub async fn step(&mut self) -> &PageState {
        let next = match self.state {
            PageState::Fetching(page) => self.fetch(page).await,
            PageState::HasMore { next_page } => {
                self.delay.sleep(self.policy.inter_page_delay).await;
                PageState::Fetching(next_page)
            }
            PageState::Done(_) | PageState::Failed(_) => return &self.state,
        };
        self.state = next;
        &self.state
    }

    /// Steps until `Done` or `Failed`.
    ///
    /// # Errors
    ///
    /// Returns the error captured by the `Failed` state: a fetch failure for
    /// some page or [`SyncError::PaginationLimit`].
    pub async fn run(mut self) -> Result<PaginationOutcome, SyncError> {
        loop {
            self.step().await;
            match self.state {
                PageState::Done(end) => {
                    return Ok(PaginationOutcome {
                        orders: self.orders,
                        pages_fetched: self.pages_fetched,
                        end,
                    });
                }
                PageState::Failed(err) => return Err(err),
                PageState::Fetching(_) | PageState::HasMore { .. } => {}
            }
        }
    }

    async fn fetch(&mut self, page: u32) -> PageState {
        let bounded = self.total_pages.is_some_and(|total| page <= total);
        if page > self.policy.max_pages && !bounded {
            tracing::warn!(
                max_pages = self.policy.max_pages,
                "pagination limit reached; aborting sync"
            );
            return PageState::Failed(SyncError::PaginationLimit {
                max_pages: self.policy.max_pages,
            });
        }

        self.progress.report(ProgressUpdate::fetching(page));

        let payload = match self.source.fetch_page(page).await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(page, %error, "page fetch failed; aborting sync");
                return PageState::Failed(error);
            }
        };
        self.pages_fetched += 1;

        let shape = classify(&payload);
        let shape_name = shape.name();
        let hint = total_pages_hint(&payload);
        let orders = shape.into_orders();
        let count = orders.len();
        self.total_pages = hint;

        tracing::info!(
            page,
            count,
            shape = shape_name,
            total_pages = ?hint,
            "extracted orders from page"
        );

        if count == 0 {
            if page == 1 {
                tracing::warn!(
                    shape = shape_name,
                    "first page held no orders; session may be missing or history empty"
                );
                return PageState::Done(EndReason::EmptyFirstPage);
            }
            return PageState::Done(EndReason::EmptyPage { page });
        }

        self.orders.extend(orders);
        self.progress.report(ProgressUpdate::page_complete(page));

        match hint {
            Some(total_pages) if page >= total_pages => {
                PageState::Done(EndReason::TotalPagesReached { page, total_pages })
            }
            Some(_) => PageState::HasMore {
                next_page: page + 1,
            },
            None if count < self.policy.min_page_size => {
                PageState::Done(EndReason::ShortPage { page, count })
            }
            None => PageState::HasMore {
                next_page: page + 1,
            },
        }
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
