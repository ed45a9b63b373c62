//! Typed host-domain contracts shared by the storefront cart and its browser adapters.
//!
//! This crate is the API-first boundary for platform services used by the storefront. It exposes
//! the durable key-value backing-store contract, the read-only product catalog model, exact money
//! amounts, task spawning, and order stamping. Concrete browser adapters live in
//! `storefront_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod money;
pub mod order;
pub mod storage;
pub mod task;

pub use catalog::{
    find_product_by_slug, parse_product_catalog, MemoryProductCatalog, NoopProductCatalog,
    Product, ProductCatalog, ProductCatalogFuture, ProductId, PRODUCT_CATALOG_URL,
};
pub use money::{Money, MoneyError};
pub use order::{next_order_stamp, OrderStamp};
pub use storage::kv::{
    load_json_with, save_json_with, KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore,
    NoopKeyValueStore,
};
pub use task::{InlineTaskSpawner, LocalTask, TaskSpawner};
