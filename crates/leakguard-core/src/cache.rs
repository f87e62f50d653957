//! Transparent response caching
//!
//! Successful GET payloads are stored as timestamped entries in the host
//! key/value store under a namespace prefix, and served back while their
//! TTL holds. Persistence failures are never surfaced: a broken read or
//! write is logged and behaves as a cache miss.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::KvStore;

/// Namespace prefix for every cache key, so a bulk clear leaves unrelated
/// stored data (credentials, user profile) untouched
pub const CACHE_PREFIX: &str = "http_cache_";

/// One cached payload with its storage timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: Value,
    pub stored_at_ms: i64,
}

impl CacheEntry {
    /// Stamp a payload with the current wall-clock time
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            stored_at_ms: Utc::now().timestamp_millis(),
        }
    }

    /// An entry is valid while less than `ttl` has elapsed since storage.
    /// A zero TTL is always invalid and forces a refetch.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        if ttl.is_zero() {
            return false;
        }
        let elapsed_ms = Utc::now().timestamp_millis() - self.stored_at_ms;
        elapsed_ms < ttl.as_millis() as i64
    }
}

/// TTL cache over the host key/value store
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KvStore>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Deterministic key for a logical request
    ///
    /// Identical URL + payload always collide; differing parameters never
    /// do. Payload canonicalization is order-independent because serde_json
    /// keeps object keys sorted.
    pub fn cache_key(url: &str, payload: Option<&Value>) -> String {
        let params = match payload {
            Some(value) => value.to_string(),
            None => "{}".to_string(),
        };
        format!("{CACHE_PREFIX}{url}:{params}")
    }

    /// Look up an entry; any persistence or decode failure is a miss
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let raw = self.store.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    /// Store a payload, overwriting any previous entry unconditionally
    pub fn set(&self, key: &str, payload: &Value) {
        let entry = CacheEntry::new(payload.clone());
        match serde_json::to_string(&entry) {
            Ok(raw) => self.store.set_item(key, &raw),
            Err(e) => log::warn!("failed to serialize cache entry {key}: {e}"),
        }
    }

    /// Remove one entry
    pub fn invalidate(&self, key: &str) {
        self.store.remove_item(key);
    }

    /// Remove every entry under the cache namespace
    pub fn clear_all(&self) {
        for key in self.store.list_keys() {
            if key.starts_with(CACHE_PREFIX) {
                self.store.remove_item(&key);
            }
        }
    }
}
