//! Client configuration loaded from environment variables.

/// Connection settings for the task API.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the task API (default: `http://localhost:3000`).
    pub base_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Freshness window for cached list pages in seconds (default: `10`).
    pub list_cache_ttl_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `API_BASE_URL`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `LIST_CACHE_TTL_SECS`  | `10`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let list_cache_ttl_secs: u64 = std::env::var("LIST_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("LIST_CACHE_TTL_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
            list_cache_ttl_secs,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            request_timeout_secs: 30,
            list_cache_ttl_secs: 10,
        }
    }
}
