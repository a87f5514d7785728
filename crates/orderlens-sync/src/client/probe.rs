//! Pre-sync authentication probe.

use reqwest::{StatusCode, Url};

use crate::error::SyncError;
use crate::source::ProbeOutcome;

use super::OrderClient;

impl OrderClient {
    /// Requests page 1 once and checks for a missing session.
    ///
    /// A 403, or a redirect chain that lands on a URL mentioning `login`
    /// anywhere (host, path or query), reports [`ProbeOutcome::NotAuthenticated`]. Any other status
    /// is [`ProbeOutcome::Reachable`]; the body is not read.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] on network failure. The sync engine logs
    /// and tolerates this rather than aborting.
    pub async fn probe(&self) -> Result<ProbeOutcome, SyncError> {
        let url = self.page_url(1);
        let response = self.request(&url).send().await?;
        let status = response.status();
        let resolved = response.url().clone();

        if status == StatusCode::FORBIDDEN || is_login_url(&resolved) {
            return Ok(ProbeOutcome::NotAuthenticated {
                url: resolved.to_string(),
            });
        }

        Ok(ProbeOutcome::Reachable {
            status: status.as_u16(),
        })
    }
}

pub(super) fn is_login_url(url: &Url) -> bool {
    url.as_str().to_ascii_lowercase().contains("login")
}
