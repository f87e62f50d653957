//! Leakguard Core - unified HTTP request pipeline for the content client
//!
//! This crate implements the one subsystem of the client with real
//! engineering in it: a request pipeline composing transparent response
//! caching, bounded fixed-delay retry, ordered interceptor chains,
//! reference-counted loading feedback, and normalization of every failure
//! into a single classified error type.
//!
//! # Main Components
//!
//! - **Error Handling**: one classified error kind surfaced to callers,
//!   built with `thiserror` and `anyhow`
//! - **Cache**: TTL-stamped GET responses over a host key/value store
//! - **Interceptors**: append-only request/response/error chains with a
//!   default auth + logging + auth-expiry set
//! - **Loading Indicator**: reference-counted spinner shared across
//!   concurrent requests
//! - **Facade**: `get`/`post`/`put`/`delete` with typed payload decoding
//!
//! # Example
//!
//! ```no_run
//! use leakguard_core::{CallOptions, HttpClient, Result};
//!
//! async fn example() -> Result<()> {
//!     let client = HttpClient::with_default_config()?;
//!     let cases: serde_json::Value = client
//!         .get("/cases", None, CallOptions::new().with_cache(true))
//!         .await?;
//!     println!("{cases}");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod facade;
pub mod interceptor;
pub mod loading;
pub mod platform;
pub mod request;
pub mod store;
pub mod transport;

// Re-export the types most callers need
pub use cache::{CacheEntry, CacheStore, CACHE_PREFIX};
pub use classify::{classify, Failure};
pub use config::{business_code, HttpConfig, SIGN_IN_ROUTE};
pub use envelope::{normalize_body, Envelope, RawEnvelope};
pub use error::{Error, ErrorKind, Result};
pub use executor::RequestExecutor;
pub use facade::{HttpClient, HttpClientBuilder};
pub use interceptor::{
    ErrorInterceptor, InterceptorRegistry, RequestInterceptor, ResponseInterceptor,
};
pub use loading::{LoadingGuard, LoadingIndicator};
pub use platform::{LoadingSink, Navigator, NoopPlatform, Toaster};
pub use request::{CallOptions, HttpMethod, RequestDescriptor};
pub use store::{KvStore, MemoryStore, AUTH_TOKEN_KEY, USER_INFO_KEY};
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
