use storefront_host::{
    InlineTaskSpawner, KeyValueStore, KeyValueStoreFuture, LocalTask, NoopKeyValueStore,
    NoopProductCatalog, Product, ProductCatalog, ProductCatalogFuture, TaskSpawner,
};

use crate::{WebKeyValueStore, WebProductCatalog, WebTaskSpawner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `storefront_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, `fetch`, microtask spawning).
    Browser,
    /// Inert adapters for builds that run outside a browser page (previews, host tests).
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete backing store behind [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub enum KeyValueStoreAdapter {
    /// Browser `localStorage`.
    Browser(WebKeyValueStore),
    /// No-op fallback; every load is absent.
    Stub(NoopKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_raw(key),
            Self::Stub(store) => store.load_raw(key),
        }
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_raw(key, raw),
            Self::Stub(store) => store.save_raw(key, raw),
        }
    }

    fn delete_raw<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_raw(key),
            Self::Stub(store) => store.delete_raw(key),
        }
    }
}

/// Adapter enum that erases the concrete catalog source behind [`ProductCatalog`].
#[derive(Debug, Clone, Copy)]
pub enum ProductCatalogAdapter {
    /// Static catalog document fetched from the storefront origin.
    Browser(WebProductCatalog),
    /// Empty catalog.
    Stub(NoopProductCatalog),
}

impl ProductCatalog for ProductCatalogAdapter {
    fn fetch_products<'a>(&'a self) -> ProductCatalogFuture<'a, Result<Vec<Product>, String>> {
        match self {
            Self::Browser(catalog) => catalog.fetch_products(),
            Self::Stub(catalog) => catalog.fetch_products(),
        }
    }
}

/// Adapter enum that erases the concrete spawner behind [`TaskSpawner`].
#[derive(Debug, Clone, Copy)]
pub enum TaskSpawnerAdapter {
    /// JS microtask queue.
    Browser(WebTaskSpawner),
    /// Runs tasks to completion on the calling stack.
    Inline(InlineTaskSpawner),
}

impl TaskSpawner for TaskSpawnerAdapter {
    fn spawn(&self, task: LocalTask) {
        match self {
            Self::Browser(spawner) => spawner.spawn(task),
            Self::Inline(spawner) => spawner.spawn(task),
        }
    }
}

/// Builds the backing store for the selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(WebKeyValueStore),
        HostStrategy::Stub => KeyValueStoreAdapter::Stub(NoopKeyValueStore),
    }
}

/// Builds the product catalog for the selected host strategy.
pub fn product_catalog() -> ProductCatalogAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ProductCatalogAdapter::Browser(WebProductCatalog::default()),
        HostStrategy::Stub => ProductCatalogAdapter::Stub(NoopProductCatalog),
    }
}

/// Builds the task spawner for the selected host strategy.
pub fn task_spawner() -> TaskSpawnerAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => TaskSpawnerAdapter::Browser(WebTaskSpawner),
        HostStrategy::Stub => TaskSpawnerAdapter::Inline(InlineTaskSpawner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_follow_selected_strategy() {
        let expected_browser = selected_host_strategy() == HostStrategy::Browser;
        assert_eq!(
            matches!(key_value_store(), KeyValueStoreAdapter::Browser(_)),
            expected_browser
        );
        assert_eq!(
            matches!(product_catalog(), ProductCatalogAdapter::Browser(_)),
            expected_browser
        );
        assert_eq!(
            matches!(task_spawner(), TaskSpawnerAdapter::Browser(_)),
            expected_browser
        );
        assert_eq!(
            host_strategy_name(),
            if expected_browser { "browser" } else { "stub" }
        );
    }
}
