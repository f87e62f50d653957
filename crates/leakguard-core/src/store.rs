//! Persistence boundary
//!
//! The host platform provides a synchronous key/value store; the pipeline
//! uses it for response caching and credential storage. The trait is
//! infallible by contract: implementations swallow and log their own
//! failures, and callers treat an absent value as the only miss signal.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the auth token is persisted
pub const AUTH_TOKEN_KEY: &str = "access_token";
/// Key under which cached user profile data is persisted
pub const USER_INFO_KEY: &str = "user_info";

/// Synchronous key/value storage provided by the host platform
pub trait KvStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    fn list_keys(&self) -> Vec<String>;
}

/// In-memory store used by default and in tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Err(poisoned) => {
                poisoned
                    .into_inner()
                    .insert(key.to_string(), value.to_string());
            }
        }
    }

    fn remove_item(&self, key: &str) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.remove(key);
            }
            Err(poisoned) => {
                poisoned.into_inner().remove(key);
            }
        }
    }

    fn list_keys(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.keys().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k"), None);

        store.set_item("k", "v1");
        assert_eq!(store.get_item("k").as_deref(), Some("v1"));

        store.set_item("k", "v2");
        assert_eq!(store.get_item("k").as_deref(), Some("v2"));

        store.remove_item("k");
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_list_keys() {
        let store = MemoryStore::new();
        store.set_item("a", "1");
        store.set_item("b", "2");

        let mut keys = store.list_keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
