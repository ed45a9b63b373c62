use serde::{Deserialize, Serialize};
use storefront_host::{Money, Product, ProductId};

pub const CART_SCHEMA_VERSION: u32 = 1;
pub const CART_STORAGE_KEY: &str = "mini-commerce-cart";
/// The only cart failure a shopper ever sees.
pub const CART_LOAD_ERROR: &str = "Failed to load cart from storage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreConfig {
    pub storage_key: String,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

/// One product in the cart. Product fields are copied in flat, next to the line's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            color: None,
            size: None,
            quantity,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn line_total(&self) -> Money {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Authoritative in-memory cart. Only `items` is persisted.
///
/// Fields are crate-private so that every change goes through [`crate::reduce_cart`], which keeps
/// one line per product and every quantity at least 1.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    pub(crate) items: Vec<CartLine>,
    pub(crate) is_loading: bool,
    pub(crate) error: Option<String>,
}

impl CartState {
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.id() == product_id)
    }

    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }
}
