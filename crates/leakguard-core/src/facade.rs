//! Public client surface
//!
//! [`HttpClient`] is the entry point applications use: `get`/`post`/`put`/
//! `delete` with typed payload decoding, a generic `call` for prepared
//! descriptors, cache management, and interceptor registration. The
//! builder lets tests (and unusual hosts) substitute the transport, the
//! key/value store, and the UI boundary.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::executor::{resolve_url, RequestExecutor};
use crate::interceptor::{
    ErrorInterceptor, InterceptorRegistry, RequestInterceptor, ResponseInterceptor,
};
use crate::loading::LoadingIndicator;
use crate::platform::{LoadingSink, Navigator, NoopPlatform, Toaster};
use crate::request::{CallOptions, HttpMethod, RequestDescriptor};
use crate::store::{KvStore, MemoryStore};
use crate::transport::{ReqwestTransport, Transport};

/// Unified HTTP client for the content API
pub struct HttpClient {
    executor: RequestExecutor,
    registry: Arc<InterceptorRegistry>,
    cache: CacheStore,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a client with the given config, the reqwest transport, an
    /// in-memory store, a headless UI boundary, and the default
    /// interceptor chain.
    pub fn new(config: HttpConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a client with library defaults throughout
    pub fn with_default_config() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Issue a GET request, decoding the envelope payload into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<Value>,
        options: CallOptions,
    ) -> Result<T> {
        self.request(HttpMethod::Get, url, params, options).await
    }

    /// Issue a POST request, decoding the envelope payload into `T`
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: Option<Value>,
        options: CallOptions,
    ) -> Result<T> {
        self.request(HttpMethod::Post, url, body, options).await
    }

    /// Issue a PUT request, decoding the envelope payload into `T`
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        body: Option<Value>,
        options: CallOptions,
    ) -> Result<T> {
        self.request(HttpMethod::Put, url, body, options).await
    }

    /// Issue a DELETE request, decoding the envelope payload into `T`
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<Value>,
        options: CallOptions,
    ) -> Result<T> {
        self.request(HttpMethod::Delete, url, params, options).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<Value>,
        options: CallOptions,
    ) -> Result<T> {
        let mut descriptor = RequestDescriptor::new(method, url, &self.config);
        descriptor.payload = payload;
        let payload = self.call(options.apply(descriptor)).await?;
        decode(payload)
    }

    /// Run a fully prepared descriptor through the pipeline
    pub async fn call(&self, descriptor: RequestDescriptor) -> Result<Value> {
        self.executor.execute(descriptor).await
    }

    /// Drop the cached response for one logical request
    pub fn invalidate_cache(&self, url: &str, params: Option<&Value>) {
        let resolved = resolve_url(&self.config.base_url, url);
        self.cache
            .invalidate(&CacheStore::cache_key(&resolved, params));
    }

    /// Drop every cached response, leaving unrelated stored data intact
    pub fn clear_all_cache(&self) {
        self.cache.clear_all();
    }

    pub fn register_request_interceptor(&self, interceptor: Arc<dyn RequestInterceptor>) {
        self.registry.register_request(interceptor);
    }

    pub fn register_response_interceptor(&self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.registry.register_response(interceptor);
    }

    pub fn register_error_interceptor(&self, interceptor: Arc<dyn ErrorInterceptor>) {
        self.registry.register_error(interceptor);
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| Error::unknown(format!("failed to decode response payload: {e}")))
}

/// Assembles an [`HttpClient`] with substitutable collaborators
#[derive(Default)]
pub struct HttpClientBuilder {
    config: Option<HttpConfig>,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn KvStore>>,
    loading_sink: Option<Arc<dyn LoadingSink>>,
    toaster: Option<Arc<dyn Toaster>>,
    navigator: Option<Arc<dyn Navigator>>,
    skip_default_interceptors: bool,
}

impl HttpClientBuilder {
    pub fn config(mut self, config: HttpConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn store(mut self, store: Arc<dyn KvStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn loading_sink(mut self, sink: Arc<dyn LoadingSink>) -> Self {
        self.loading_sink = Some(sink);
        self
    }

    pub fn toaster(mut self, toaster: Arc<dyn Toaster>) -> Self {
        self.toaster = Some(toaster);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build with an empty interceptor registry instead of the default chain
    pub fn without_default_interceptors(mut self) -> Self {
        self.skip_default_interceptors = true;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let config = self.config.unwrap_or_default();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new().map_err(|e| Error::Network {
                message: "failed to initialize transport".to_string(),
                source: Some(anyhow::Error::new(e)),
            })?),
        };
        let store: Arc<dyn KvStore> = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let loading_sink: Arc<dyn LoadingSink> = self
            .loading_sink
            .unwrap_or_else(|| Arc::new(NoopPlatform));
        let toaster: Arc<dyn Toaster> = self.toaster.unwrap_or_else(|| Arc::new(NoopPlatform));
        let navigator: Arc<dyn Navigator> =
            self.navigator.unwrap_or_else(|| Arc::new(NoopPlatform));

        let registry = Arc::new(if self.skip_default_interceptors {
            InterceptorRegistry::new()
        } else {
            InterceptorRegistry::with_defaults(store.clone(), navigator)
        });
        let cache = CacheStore::new(store);
        let loading = Arc::new(LoadingIndicator::new(loading_sink));

        let executor = RequestExecutor::new(
            transport,
            registry.clone(),
            cache.clone(),
            loading,
            toaster,
            config.clone(),
        );

        Ok(HttpClient {
            executor,
            registry,
            cache,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_into_typed_value() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Item {
            id: u64,
            title: String,
        }

        let item: Item = decode(json!({"id": 7, "title": "Basement seal"})).unwrap();
        assert_eq!(
            item,
            Item {
                id: 7,
                title: "Basement seal".to_string()
            }
        );
    }

    #[test]
    fn test_decode_failure_is_unknown_kind() {
        let result: Result<u64> = decode(json!({"nested": true}));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Unknown);
    }
}
