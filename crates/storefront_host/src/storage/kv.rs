//! Durable key-value backing-store contracts and adapters.
//!
//! Values are JSON documents stored as text per key. Stores are treated as unreliable: a key may be
//! absent, hold stale or corrupted text, or reject writes (for example when a browser quota is
//! exceeded). Callers decide how to recover.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`KeyValueStore`] async methods.
pub type KeyValueStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for durable raw JSON text keyed by string.
pub trait KeyValueStore {
    /// Loads the raw text stored under `key`, or `None` when the key is absent.
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves raw text under `key`, replacing any previous value.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>>;

    /// Deletes the value stored under `key`.
    fn delete_raw<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests. Reads are always absent.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn load_raw<'a>(
        &'a self,
        _key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_raw<'a>(&'a self, _key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same entries.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Seeds `key` with raw text without going through the async API.
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw.into());
    }

    /// Returns the raw text currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.insert_raw(key, raw);
            Ok(())
        })
    }

    fn delete_raw<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed value through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub async fn load_json_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_raw(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_json_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Banner {
        dismissed: bool,
    }

    #[test]
    fn memory_store_round_trip_overwrite_and_delete() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        block_on(store_obj.save_raw("cart", "{\"a\":1}")).expect("save");
        block_on(store_obj.save_raw("cart", "{\"a\":2}")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.load_raw("cart")).expect("load"),
            Some("{\"a\":2}".to_string())
        );

        block_on(store_obj.delete_raw("cart")).expect("delete");
        assert_eq!(block_on(store_obj.load_raw("cart")).expect("load"), None);
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryKeyValueStore::default();
        let clone = store.clone();
        clone.insert_raw("theme-storage", "\"dark\"");
        clone.insert_raw("a-key", "1");

        assert_eq!(store.raw("theme-storage").as_deref(), Some("\"dark\""));
        assert_eq!(store.keys(), vec!["a-key".to_string(), "theme-storage".to_string()]);
    }

    #[test]
    fn typed_json_helpers_round_trip() {
        let store = MemoryKeyValueStore::default();
        block_on(save_json_with(&store, "banner", &Banner { dismissed: true }))
            .expect("save typed");

        let loaded: Option<Banner> = block_on(load_json_with(&store, "banner")).expect("load");
        assert_eq!(loaded, Some(Banner { dismissed: true }));
    }

    #[test]
    fn typed_load_reports_malformed_json() {
        let store = MemoryKeyValueStore::default();
        store.insert_raw("banner", "{not json");

        let err = block_on(load_json_with::<_, Banner>(&store, "banner"))
            .expect_err("malformed json should fail");
        assert!(!err.is_empty());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        let store_obj: &dyn KeyValueStore = &store;
        block_on(store_obj.save_raw("k", "{}")).expect("save");
        assert_eq!(block_on(store_obj.load_raw("k")).expect("load"), None);
        block_on(store_obj.delete_raw("k")).expect("delete");
    }
}
