//! Composable interceptor chains
//!
//! Three ordered lists of handlers (request, response, error) are folded
//! left-to-right around every dispatched request. Registration order is
//! execution order, and a later handler always sees the output of earlier
//! ones. The lists are append-only for the registry's lifetime.
//!
//! The default chain mirrors what the application installs at startup:
//! an auth-token injector, a debug-build logging triple, and an
//! auth-expiry handler that wipes credentials and resets navigation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::config::SIGN_IN_ROUTE;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::platform::Navigator;
use crate::request::RequestDescriptor;
use crate::store::{KvStore, AUTH_TOKEN_KEY, USER_INFO_KEY};

/// Transforms a request descriptor before dispatch
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn handle(&self, request: RequestDescriptor) -> Result<RequestDescriptor>;
}

/// Transforms a normalized envelope after a successful response
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn handle(&self, envelope: Envelope, request: &RequestDescriptor) -> Result<Envelope>;
}

/// Observes or replaces a classified error before it reaches the caller
#[async_trait]
pub trait ErrorInterceptor: Send + Sync {
    async fn handle(&self, error: Error, request: &RequestDescriptor) -> Error;
}

/// Ordered, append-only interceptor lists
///
/// Owned explicitly by each client rather than living in module state, so
/// tests construct isolated registries. Registration is `&self`: the lists
/// grow under a write lock, while folds clone the current list and run
/// without holding it.
#[derive(Default)]
pub struct InterceptorRegistry {
    request: RwLock<Vec<Arc<dyn RequestInterceptor>>>,
    response: RwLock<Vec<Arc<dyn ResponseInterceptor>>>,
    error: RwLock<Vec<Arc<dyn ErrorInterceptor>>>,
}

impl InterceptorRegistry {
    /// An empty registry with no handlers installed
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry carrying the default application chain
    pub fn with_defaults(store: Arc<dyn KvStore>, navigator: Arc<dyn Navigator>) -> Self {
        let registry = Self::new();
        registry.register_request(Arc::new(AuthTokenInjector::new(store.clone())));
        if cfg!(debug_assertions) {
            registry.register_request(Arc::new(RequestLogger));
            registry.register_response(Arc::new(ResponseLogger));
            registry.register_error(Arc::new(ErrorLogger));
        }
        registry.register_error(Arc::new(AuthExpiryHandler::new(store, navigator)));
        registry
    }

    pub fn register_request(&self, interceptor: Arc<dyn RequestInterceptor>) {
        self.request
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .push(interceptor);
    }

    pub fn register_response(&self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.response
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .push(interceptor);
    }

    pub fn register_error(&self, interceptor: Arc<dyn ErrorInterceptor>) {
        self.error
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .push(interceptor);
    }

    /// Fold the request list, producing the descriptor sent to transport
    pub async fn run_request(&self, mut request: RequestDescriptor) -> Result<RequestDescriptor> {
        let handlers = self
            .request
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        for handler in handlers {
            request = handler.handle(request).await?;
        }
        Ok(request)
    }

    /// Fold the response list over a classified-OK envelope
    pub async fn run_response(
        &self,
        mut envelope: Envelope,
        request: &RequestDescriptor,
    ) -> Result<Envelope> {
        let handlers = self
            .response
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        for handler in handlers {
            envelope = handler.handle(envelope, request).await?;
        }
        Ok(envelope)
    }

    /// Fold the error list; the result is what the caller ultimately sees
    pub async fn run_error(&self, mut error: Error, request: &RequestDescriptor) -> Error {
        let handlers = self
            .error
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        for handler in handlers {
            error = handler.handle(error, request).await;
        }
        error
    }
}

/// Injects the persisted auth token into outgoing requests
///
/// A missing token is not an error: the request simply proceeds
/// unauthenticated.
pub struct AuthTokenInjector {
    store: Arc<dyn KvStore>,
}

impl AuthTokenInjector {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestInterceptor for AuthTokenInjector {
    async fn handle(&self, mut request: RequestDescriptor) -> Result<RequestDescriptor> {
        if request.with_auth_token {
            if let Some(token) = self.store.get_item(AUTH_TOKEN_KEY) {
                request
                    .headers
                    .insert("X-Access-Token".to_string(), token);
            }
        }
        Ok(request)
    }
}

/// Debug-build echo of outgoing requests; must not alter the descriptor
pub struct RequestLogger;

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn handle(&self, request: RequestDescriptor) -> Result<RequestDescriptor> {
        log::debug!(
            "[request] {} {} payload={:?}",
            request.method.as_str(),
            request.url,
            request.payload
        );
        Ok(request)
    }
}

/// Debug-build echo of normalized responses
pub struct ResponseLogger;

#[async_trait]
impl ResponseInterceptor for ResponseLogger {
    async fn handle(&self, envelope: Envelope, request: &RequestDescriptor) -> Result<Envelope> {
        log::debug!(
            "[response] {} {} code={}",
            request.method.as_str(),
            request.url,
            envelope.code
        );
        Ok(envelope)
    }
}

/// Debug-build echo of classified errors
pub struct ErrorLogger;

#[async_trait]
impl ErrorInterceptor for ErrorLogger {
    async fn handle(&self, error: Error, request: &RequestDescriptor) -> Error {
        log::debug!(
            "[error] {} {} kind={:?} code={} message={}",
            request.method.as_str(),
            request.url,
            error.kind(),
            error.code(),
            error.message()
        );
        error
    }
}

/// Reacts to an expired session: wipes persisted credentials and resets
/// navigation to the sign-in route, then passes the error through unchanged
/// so call sites still observe the failure.
pub struct AuthExpiryHandler {
    store: Arc<dyn KvStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthExpiryHandler {
    pub fn new(store: Arc<dyn KvStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }
}

#[async_trait]
impl ErrorInterceptor for AuthExpiryHandler {
    async fn handle(&self, error: Error, _request: &RequestDescriptor) -> Error {
        if error.is_auth_expired() {
            self.store.remove_item(AUTH_TOKEN_KEY);
            self.store.remove_item(USER_INFO_KEY);
            self.navigator.relaunch(SIGN_IN_ROUTE);
        }
        error
    }
}
