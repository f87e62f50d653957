//! Request descriptors and per-call options

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::config::HttpConfig;

/// HTTP method supported by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Wire representation of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only GET responses are ever cached
    pub fn is_cacheable(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }

    /// Whether the payload travels in the URL query rather than the body
    pub fn payload_in_query(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// Fully-resolved description of one logical request
///
/// Built once per call by merging caller options over the library defaults,
/// then treated as immutable by the executor: request interceptors receive
/// a copy and return a possibly modified one, and a retried attempt reuses
/// the interceptor-processed descriptor as-is.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub payload: Option<Value>,
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
    pub use_cache: bool,
    pub cache_ttl: Duration,
    pub retry: u32,
    pub retry_delay: Duration,
    pub show_loading: bool,
    pub loading_label: String,
    pub show_error_toast: bool,
    pub with_auth_token: bool,
}

impl RequestDescriptor {
    /// Create a descriptor carrying the library defaults from `config`
    pub fn new(method: HttpMethod, url: impl Into<String>, config: &HttpConfig) -> Self {
        Self {
            url: url.into(),
            method,
            payload: None,
            headers: config.headers.clone(),
            timeout: config.timeout,
            use_cache: config.use_cache,
            cache_ttl: config.cache_ttl,
            retry: config.retry,
            retry_delay: config.retry_delay,
            show_loading: config.show_loading,
            loading_label: config.loading_label.clone(),
            show_error_toast: config.show_error_toast,
            with_auth_token: config.with_auth_token,
        }
    }

    /// Attach a payload (query parameters for GET/DELETE, body otherwise)
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Per-call overrides merged over [`HttpConfig`] defaults
///
/// Unset fields inherit the config value; set fields win. Headers are
/// additive on top of the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub timeout: Option<Duration>,
    pub use_cache: Option<bool>,
    pub cache_ttl: Option<Duration>,
    pub retry: Option<u32>,
    pub retry_delay: Option<Duration>,
    pub show_loading: Option<bool>,
    pub loading_label: Option<String>,
    pub show_error_toast: Option<bool>,
    pub with_auth_token: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.use_cache = Some(true);
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn with_loading(mut self, show: bool) -> Self {
        self.show_loading = Some(show);
        self
    }

    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.show_loading = Some(true);
        self.loading_label = Some(label.into());
        self
    }

    pub fn with_error_toast(mut self, show: bool) -> Self {
        self.show_error_toast = Some(show);
        self
    }

    pub fn with_auth_token(mut self, with_token: bool) -> Self {
        self.with_auth_token = Some(with_token);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge these options over a descriptor built from the defaults
    pub fn apply(self, mut descriptor: RequestDescriptor) -> RequestDescriptor {
        if let Some(timeout) = self.timeout {
            descriptor.timeout = timeout;
        }
        if let Some(use_cache) = self.use_cache {
            descriptor.use_cache = use_cache;
        }
        if let Some(ttl) = self.cache_ttl {
            descriptor.cache_ttl = ttl;
        }
        if let Some(retry) = self.retry {
            descriptor.retry = retry;
        }
        if let Some(delay) = self.retry_delay {
            descriptor.retry_delay = delay;
        }
        if let Some(show) = self.show_loading {
            descriptor.show_loading = show;
        }
        if let Some(label) = self.loading_label {
            descriptor.loading_label = label;
        }
        if let Some(show) = self.show_error_toast {
            descriptor.show_error_toast = show;
        }
        if let Some(with_token) = self.with_auth_token {
            descriptor.with_auth_token = with_token;
        }
        descriptor.headers.extend(self.headers);
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_only_get_is_cacheable() {
        assert!(HttpMethod::Get.is_cacheable());
        assert!(!HttpMethod::Post.is_cacheable());
        assert!(!HttpMethod::Put.is_cacheable());
        assert!(!HttpMethod::Delete.is_cacheable());
    }

    #[test]
    fn test_descriptor_inherits_config_defaults() {
        let config = HttpConfig::default();
        let descriptor = RequestDescriptor::new(HttpMethod::Get, "/cases", &config);

        assert_eq!(descriptor.timeout, config.timeout);
        assert_eq!(descriptor.retry, 0);
        assert!(descriptor.show_loading);
        assert!(descriptor.with_auth_token);
        assert_eq!(
            descriptor.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_options_override_defaults() {
        let config = HttpConfig::default();
        let descriptor = RequestDescriptor::new(HttpMethod::Get, "/cases", &config);

        let merged = CallOptions::new()
            .with_cache_ttl(Duration::from_secs(5))
            .with_retry(2)
            .with_loading(false)
            .with_header("X-Trace-Id", "abc")
            .apply(descriptor);

        assert!(merged.use_cache);
        assert_eq!(merged.cache_ttl, Duration::from_secs(5));
        assert_eq!(merged.retry, 2);
        assert!(!merged.show_loading);
        assert_eq!(
            merged.headers.get("X-Trace-Id").map(String::as_str),
            Some("abc")
        );
        // untouched fields keep the configured defaults
        assert_eq!(merged.timeout, config.timeout);
        assert!(merged.show_error_toast);
    }

    #[test]
    fn test_loading_label_implies_loading() {
        let config = HttpConfig::default();
        let descriptor = RequestDescriptor::new(HttpMethod::Post, "/contact/booking", &config);

        let merged = CallOptions::new()
            .with_loading_label("Submitting...")
            .apply(descriptor);

        assert!(merged.show_loading);
        assert_eq!(merged.loading_label, "Submitting...");
    }
}
