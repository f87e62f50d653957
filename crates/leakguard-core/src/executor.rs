//! Request orchestration
//!
//! One logical call flows through: URL resolution → GET cache fast path →
//! loading acquisition → request interceptors (once) → a bounded attempt
//! loop over the transport with status and business validation → response
//! interceptors → cache write → error interceptors → toast → classified
//! error propagation.
//!
//! The retry loop is an explicit remaining-attempts counter with a fixed
//! delay; a retried attempt reuses the interceptor-processed descriptor
//! without re-running the request chain. A valid cache hit short-circuits
//! everything: no loading indicator, no interceptors, no classification.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::cache::CacheStore;
use crate::classify::{classify, Failure};
use crate::config::HttpConfig;
use crate::envelope::{normalize_body, Envelope};
use crate::error::{Error, Result};
use crate::interceptor::InterceptorRegistry;
use crate::loading::LoadingIndicator;
use crate::platform::Toaster;
use crate::request::RequestDescriptor;
use crate::transport::{Transport, TransportRequest};

/// Orchestrates a single logical request through all pipeline stages
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    registry: Arc<InterceptorRegistry>,
    cache: CacheStore,
    loading: Arc<LoadingIndicator>,
    toaster: Arc<dyn Toaster>,
    config: HttpConfig,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        registry: Arc<InterceptorRegistry>,
        cache: CacheStore,
        loading: Arc<LoadingIndicator>,
        toaster: Arc<dyn Toaster>,
        config: HttpConfig,
    ) -> Self {
        Self {
            transport,
            registry,
            cache,
            loading,
            toaster,
            config,
        }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Run one logical call to completion, returning the unwrapped payload
    pub async fn execute(&self, mut request: RequestDescriptor) -> Result<Value> {
        request.url = resolve_url(&self.config.base_url, &request.url);

        let cache_key = (request.method.is_cacheable() && request.use_cache)
            .then(|| CacheStore::cache_key(&request.url, request.payload.as_ref()));

        // deliberate fast path: a valid hit skips loading and interceptors
        if let Some(key) = &cache_key {
            if let Some(entry) = self.cache.get(key) {
                if entry.is_valid(request.cache_ttl) {
                    return Ok(entry.payload);
                }
            }
        }

        // the guard releases on every exit path below, including early `?`
        let _guard = request
            .show_loading
            .then(|| self.loading.acquire(&request.loading_label));

        match self.dispatch(&request, cache_key.as_deref()).await {
            Ok(payload) => Ok(payload),
            Err(error) => {
                let error = self.registry.run_error(error, &request).await;
                if request.show_error_toast {
                    self.toaster.toast(error.message());
                }
                Err(error)
            }
        }
    }

    /// Interceptor pre-processing plus the bounded attempt loop
    async fn dispatch(
        &self,
        request: &RequestDescriptor,
        cache_key: Option<&str>,
    ) -> Result<Value> {
        let request = self.registry.run_request(request.clone()).await?;
        let transport_request = TransportRequest::from_descriptor(&request);

        let max_attempts = request.retry + 1;
        let mut attempt = 1u32;
        loop {
            match self.attempt(&request, &transport_request, cache_key).await {
                Ok(payload) => return Ok(payload),
                // an expired session aborts remaining retries; the default
                // error chain handles the credential wipe and redirect
                Err(error) if attempt < max_attempts && !error.is_auth_expired() => {
                    log::warn!(
                        "{} {} failed on attempt {}/{} ({}), retrying in {:?}",
                        request.method.as_str(),
                        request.url,
                        attempt,
                        max_attempts,
                        error.message(),
                        request.retry_delay
                    );
                    attempt += 1;
                    tokio::time::sleep(request.retry_delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// One transport round-trip with validation and post-processing
    async fn attempt(
        &self,
        request: &RequestDescriptor,
        transport_request: &TransportRequest,
        cache_key: Option<&str>,
    ) -> Result<Value> {
        let response = self
            .transport
            .issue(transport_request)
            .await
            .map_err(|e| classify(Failure::Transport(e)))?;

        if !(200..300).contains(&response.status) {
            return Err(classify(Failure::Status(response.status)));
        }

        let envelope = normalize_body(response.body)
            .ok_or_else(|| Error::unknown("response body is not a recognized envelope"))?;

        if !envelope.ok {
            return Err(classify(Failure::Business {
                code: envelope.code,
                message: envelope.message,
            }));
        }

        let envelope: Envelope = self.registry.run_response(envelope, request).await?;

        if let Some(key) = cache_key {
            self.cache.set(key, &envelope.payload);
        }

        Ok(envelope.payload)
    }
}

/// Resolve a request path against the configured base URL
///
/// Absolute http(s) URLs pass through unchanged; relative paths are joined
/// to the base with exactly one `/` at the boundary.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    let is_absolute = Url::parse(path)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if is_absolute {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(
            resolve_url("http://localhost:8080/leakguard", "https://cdn.example.com/img.png"),
            "https://cdn.example.com/img.png"
        );
    }

    #[test]
    fn test_relative_paths_join_with_single_slash() {
        let base = "http://localhost:8080/leakguard";
        assert_eq!(resolve_url(base, "/cases"), format!("{base}/cases"));
        assert_eq!(resolve_url(base, "cases"), format!("{base}/cases"));
        assert_eq!(
            resolve_url("http://localhost:8080/leakguard/", "/cases"),
            format!("{base}/cases")
        );
    }

    #[test]
    fn test_scheme_like_paths_are_not_absolute() {
        // "cases:1" parses as a URL with scheme "cases"; it must still be
        // treated as a relative path
        assert_eq!(
            resolve_url("http://localhost:8080", "cases:1"),
            "http://localhost:8080/cases:1"
        );
    }
}
