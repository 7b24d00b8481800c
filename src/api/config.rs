use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://192.168.100.110:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

pub const TRANSACTIONS_PATH: &str = "/api/transactions";
pub const CATEGORIES_PATH: &str = "/api/categories";

/// Everything the HTTP client needs to know about the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
    /// Ignore `HTTP_PROXY` and friends; handy for hosts on the local network.
    pub no_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            no_proxy: false,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn no_proxy(mut self, no_proxy: bool) -> Self {
        self.no_proxy = no_proxy;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
