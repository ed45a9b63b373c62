//! `localStorage`-backed key-value store implementation.
//!
//! The browser API is synchronous, so every [`KeyValueStore`] future returned here is already
//! complete when first polled. Writes can still fail, most often when the origin's storage quota
//! is exhausted or storage is disabled by privacy settings.

use storefront_host::{KeyValueStore, KeyValueStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser key-value store backed by `window.localStorage`.
pub struct WebKeyValueStore;

impl WebKeyValueStore {
    /// Loads raw text for a key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read throws.
    pub fn load_text(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(key)
                .map_err(|e| crate::interop::describe_js_error("localStorage get_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Saves raw text for a key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when the
    /// quota is exceeded).
    pub fn save_text(self, key: &str, raw: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .set_item(key, raw)
                .map_err(|e| crate::interop::describe_js_error("localStorage set_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw);
            Ok(())
        }
    }

    /// Deletes a key from localStorage.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn delete_text(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .remove_item(key)
                .map_err(|e| crate::interop::describe_js_error("localStorage remove_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl KeyValueStore for WebKeyValueStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.load_text(key) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_text(key, raw) })
    }

    fn delete_raw<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_text(key) })
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}
