//! Library defaults and server code tables
//!
//! Base URL selection switches on the build mode: debug builds talk to the
//! local development server, release builds to production. No other
//! environment input is consulted by the pipeline.

use std::collections::HashMap;
use std::time::Duration;

/// Development API base URL
pub const DEV_BASE_URL: &str = "http://localhost:8080/leakguard";
/// Production API base URL
pub const PROD_BASE_URL: &str = "https://api.leakguard.com/leakguard";

/// Route the default auth-expiry handler relaunches to
pub const SIGN_IN_ROUTE: &str = "/pages/login/index";

/// Business status codes embedded in response envelopes
pub mod business_code {
    /// Successful business outcome
    pub const SUCCESS: i64 = 200;
    /// Access token has expired
    pub const TOKEN_EXPIRED: i64 = 401;
    /// Request parameters rejected by the server
    pub const PARAM_ERROR: i64 = 400;
    /// Server-side failure
    pub const SERVER_ERROR: i64 = 500;
}

/// Pipeline-wide request defaults
///
/// Caller-supplied per-call options are merged over these values when a
/// descriptor is built.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL prefixed onto relative request paths
    pub base_url: String,
    /// Transport-level request timeout
    pub timeout: Duration,
    /// Retry attempts after the initial one
    pub retry: u32,
    /// Fixed delay between retry attempts
    pub retry_delay: Duration,
    /// Whether GET responses are cached by default
    pub use_cache: bool,
    /// How long a cached entry stays valid
    pub cache_ttl: Duration,
    /// Whether requests drive the shared loading indicator
    pub show_loading: bool,
    /// Label shown when this request triggers the indicator
    pub loading_label: String,
    /// Whether classified failures surface a toast
    pub show_error_toast: bool,
    /// Whether the auth-token interceptor injects credentials
    pub with_auth_token: bool,
    /// Headers applied to every request before per-call additions
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let base_url = if cfg!(debug_assertions) {
            DEV_BASE_URL.to_string()
        } else {
            PROD_BASE_URL.to_string()
        };

        Self {
            base_url,
            timeout: Duration::from_secs(10),
            retry: 0,
            retry_delay: Duration::from_millis(1000),
            use_cache: false,
            cache_ttl: Duration::from_secs(5 * 60),
            show_loading: true,
            loading_label: "Loading...".to_string(),
            show_error_toast: true,
            with_auth_token: true,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
        }
    }
}

impl HttpConfig {
    /// Create a config pointing at an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
