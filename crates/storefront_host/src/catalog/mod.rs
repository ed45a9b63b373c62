//! Read-only product catalog model and service contracts.

mod product;
mod service;

pub use product::{Product, ProductId};
pub use service::{
    find_product_by_slug, parse_product_catalog, MemoryProductCatalog, NoopProductCatalog,
    ProductCatalog, ProductCatalogFuture, PRODUCT_CATALOG_URL,
};
