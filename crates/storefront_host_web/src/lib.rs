//! Browser (`wasm32`) implementations of [`storefront_host`] service contracts.
//!
//! This crate wires the storefront to concrete browser capabilities: `localStorage` for the
//! durable key-value store, `fetch` for the static product catalog, and the JS microtask queue
//! for fire-and-forget work. Non-wasm builds compile to inert fallbacks so host-side tests can
//! link against the same adapters.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod catalog;
mod interop;
pub mod storage;
pub mod task;

pub use adapters::{
    host_strategy_name, key_value_store, product_catalog, selected_host_strategy, task_spawner,
    HostStrategy, KeyValueStoreAdapter, ProductCatalogAdapter, TaskSpawnerAdapter,
};
pub use catalog::WebProductCatalog;
pub use storage::local_store::WebKeyValueStore;
pub use task::WebTaskSpawner;
