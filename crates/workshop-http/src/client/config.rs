//! Configuration for the Workshop HTTP client.

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Configuration for the Workshop HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for relative endpoints, e.g. `http://host:8080/api/v1`.
    pub base_url: String,
    /// Connection timeout in seconds.
    pub connection_timeout_secs: u64,
    /// Whole-request timeout in milliseconds. `None` leaves it to the transport.
    pub request_timeout_ms: Option<u64>,
    /// Enable request logging.
    pub enable_logging: bool,
    /// Proxy URL (optional).
    pub proxy_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            connection_timeout_secs: 30,
            request_timeout_ms: None,
            enable_logging: false,
            proxy_url: String::new(),
            user_agent: concat!("workshop-http/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = proxy_url.into();
        self
    }
}
