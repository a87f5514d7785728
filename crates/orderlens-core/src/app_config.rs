use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Upstream order history endpoint; pages are requested as `?page=<n>`.
    pub orders_endpoint: String,
    /// Location of the JSON document holding the last synced snapshot.
    pub store_path: PathBuf,
    /// Raw `Cookie` header value carrying the upstream browser session.
    pub session_cookie: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_page_delay_ms: u64,
    pub min_page_size: usize,
    pub max_pages: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("orders_endpoint", &self.orders_endpoint)
            .field("store_path", &self.store_path)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .field("min_page_size", &self.min_page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
