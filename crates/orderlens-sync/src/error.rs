use orderlens_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(
        "not authenticated with the order history endpoint ({url}); log in to the site in a browser session and retry"
    )]
    NotAuthenticated { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: u32 },

    #[error("invalid orders endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to persist synced orders: {0}")]
    Store(#[from] StoreError),
}

impl SyncError {
    /// Returns `true` for errors raised while requesting or decoding a page:
    /// a transport failure, a non-success status, or an undecodable body.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Http(_) | SyncError::UnexpectedStatus { .. } | SyncError::Deserialize { .. }
        )
    }
}
