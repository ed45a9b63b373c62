//! Product catalog service contracts and adapters.

use std::{collections::HashSet, future::Future, pin::Pin, rc::Rc};

use super::Product;

/// Default location of the static catalog document served alongside the storefront.
pub const PRODUCT_CATALOG_URL: &str = "/data/products.json";

/// Object-safe boxed future used by [`ProductCatalog`] async methods.
pub type ProductCatalogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Read-only source of catalog products.
pub trait ProductCatalog {
    /// Fetches the full product list.
    fn fetch_products<'a>(&'a self) -> ProductCatalogFuture<'a, Result<Vec<Product>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Catalog with no products, for unsupported targets and baseline tests.
pub struct NoopProductCatalog;

impl ProductCatalog for NoopProductCatalog {
    fn fetch_products<'a>(&'a self) -> ProductCatalogFuture<'a, Result<Vec<Product>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory catalog over a fixed product list.
pub struct MemoryProductCatalog {
    products: Rc<Vec<Product>>,
}

impl MemoryProductCatalog {
    /// Creates a catalog serving `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Rc::new(products),
        }
    }
}

impl ProductCatalog for MemoryProductCatalog {
    fn fetch_products<'a>(&'a self) -> ProductCatalogFuture<'a, Result<Vec<Product>, String>> {
        Box::pin(async move { Ok(self.products.as_ref().clone()) })
    }
}

/// Parses a catalog document (a JSON array of product records).
///
/// # Errors
///
/// Returns an error when the document is not a product array or repeats a product id.
pub fn parse_product_catalog(raw: &str) -> Result<Vec<Product>, String> {
    let products: Vec<Product> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
        if !seen.insert(product.id) {
            return Err(format!("duplicate product id {}", product.id));
        }
    }
    Ok(products)
}

/// Finds a product by its route slug.
pub fn find_product_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    products.iter().find(|product| product.slug == slug)
}
