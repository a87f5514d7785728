//! The upstream seam the sync loop pulls pages from.

use std::future::Future;

use serde_json::Value;

use crate::error::SyncError;

/// Result of the pre-sync authentication probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered without an auth signal. The status may still be
    /// a non-success; pagination surfaces that on its own.
    Reachable { status: u16 },
    /// 403, or the request ended up on a login page.
    NotAuthenticated { url: String },
}

/// A paginated source of order history pages.
pub trait OrderSource {
    /// Requests the first page once to detect a missing session before
    /// pagination starts.
    fn probe(&self) -> impl Future<Output = Result<ProbeOutcome, SyncError>> + Send;

    /// Fetches one page (1-based) and returns its decoded JSON body.
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<Value, SyncError>> + Send;
}
