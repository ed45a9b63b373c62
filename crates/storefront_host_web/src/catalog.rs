//! `fetch`-backed product catalog implementation.

use storefront_host::{
    parse_product_catalog, Product, ProductCatalog, ProductCatalogFuture, PRODUCT_CATALOG_URL,
};

#[derive(Debug, Clone, Copy)]
/// Browser catalog that fetches the static product document from the storefront origin.
pub struct WebProductCatalog {
    url: &'static str,
}

impl Default for WebProductCatalog {
    fn default() -> Self {
        Self::new(PRODUCT_CATALOG_URL)
    }
}

impl WebProductCatalog {
    /// Creates a catalog reading from `url`.
    pub const fn new(url: &'static str) -> Self {
        Self { url }
    }

    /// Returns the document URL this catalog reads.
    pub const fn url(self) -> &'static str {
        self.url
    }
}

impl ProductCatalog for WebProductCatalog {
    fn fetch_products<'a>(&'a self) -> ProductCatalogFuture<'a, Result<Vec<Product>, String>> {
        let url = self.url;
        Box::pin(async move {
            let raw = fetch_text(url).await?;
            parse_product_catalog(&raw)
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use crate::interop::describe_js_error;

    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| describe_js_error("catalog fetch", e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| describe_js_error("catalog response cast", e))?;
    if !response.ok() {
        return Err(format!(
            "Failed to fetch products: HTTP {}",
            response.status()
        ));
    }
    let body = response
        .text()
        .map_err(|e| describe_js_error("catalog body read", e))?;
    JsFuture::from(body)
        .await
        .map_err(|e| describe_js_error("catalog body read", e))?
        .as_string()
        .ok_or_else(|| "catalog body was not text".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(url: &str) -> Result<String, String> {
    Err(format!(
        "cannot fetch {url}: the product catalog is only reachable when compiled for wasm32"
    ))
}
