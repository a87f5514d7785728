pub mod client;
pub mod engine;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pagination;
pub mod parse;
pub mod progress;
pub mod rate_limit;
pub mod source;
pub mod types;

pub use client::OrderClient;
pub use engine::{SyncEngine, SyncOutcome, SyncSummary};
pub use error::SyncError;
pub use extract::{extract, PageShape};
pub use normalize::{normalize_order, normalize_orders, NormalizedBatch};
pub use pagination::{EndReason, PageState, PaginationController, PaginationPolicy};
pub use progress::{NoProgress, ProgressSink, ProgressUpdate};
pub use rate_limit::{Clock, Delay, SystemClock, TokioDelay};
pub use source::{OrderSource, ProbeOutcome};
pub use types::{RawCost, RawOrder};
