//! HTTP client for the upstream order history endpoint.

mod probe;

use std::time::Duration;

use orderlens_core::AppConfig;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::error::SyncError;
use crate::source::{OrderSource, ProbeOutcome};

/// HTTP client for `GET <endpoint>?page=<n>`.
///
/// Non-2xx responses become [`SyncError::UnexpectedStatus`] and transport
/// failures [`SyncError::Http`]. Nothing is retried: the sync aborts on the
/// first failed page and keeps the previously stored data.
pub struct OrderClient {
    client: Client,
    endpoint: Url,
    /// Raw `Cookie` header carrying the upstream browser session.
    session_cookie: Option<String>,
}

impl OrderClient {
    /// Creates an `OrderClient` with the given timeout, `User-Agent`, and
    /// optional session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidEndpoint`] if `endpoint` is not an absolute
    /// URL, or [`SyncError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        session_cookie: Option<&str>,
    ) -> Result<Self, SyncError> {
        let endpoint_url = Url::parse(endpoint).map_err(|e| SyncError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if endpoint_url.cannot_be_a_base() {
            return Err(SyncError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: "not a hierarchical URL".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint_url,
            session_cookie: session_cookie.map(str::to_owned),
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`OrderClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SyncError> {
        Self::new(
            &config.orders_endpoint,
            config.request_timeout_secs,
            &config.user_agent,
            config.session_cookie.as_deref(),
        )
    }

    /// Fetches one page and decodes its JSON body.
    ///
    /// # Errors
    ///
    /// - [`SyncError::UnexpectedStatus`]: any non-2xx status.
    /// - [`SyncError::Http`]: network or TLS failure.
    /// - [`SyncError::Deserialize`]: the body is not JSON (e.g. an HTML
    ///   login page served with 200).
    pub async fn fetch_page(&self, page: u32) -> Result<Value, SyncError> {
        let url = self.page_url(page);
        let response = self.request(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let payload = serde_json::from_str::<Value>(&body).map_err(|e| SyncError::Deserialize {
            context: format!("orders page {page}"),
            source: e,
        })?;

        tracing::debug!(page, bytes = body.len(), "fetched orders page");
        Ok(payload)
    }

    /// Builds the URL for `page`, replacing any `page` parameter already on
    /// the configured endpoint and keeping the others.
    fn page_url(&self, page: u32) -> String {
        let mut url = self.endpoint.clone();
        let kept: Vec<(String, String)> = self
            .endpoint
            .query_pairs()
            .filter(|(k, _)| k != "page")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &kept {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("page", &page.to_string());
        }

        url.to_string()
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json,*/*;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache");

        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request
    }
}

impl OrderSource for OrderClient {
    async fn probe(&self) -> Result<ProbeOutcome, SyncError> {
        OrderClient::probe(self).await
    }

    async fn fetch_page(&self, page: u32) -> Result<Value, SyncError> {
        OrderClient::fetch_page(self, page).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
