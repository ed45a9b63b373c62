//! Local checkout: snapshot the cart into a receipt, then empty it.

use serde::Serialize;
use storefront_host::next_order_stamp;

use crate::{
    model::CartLine,
    reducer::CartError,
    store::CartStore,
    summary::{OrderSummary, PricingPolicy},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Record of a placed order. Nothing is charged; the receipt is the only output.
pub struct CheckoutReceipt {
    /// Display reference, unique within this page session.
    pub order_ref: String,
    pub placed_at_unix_ms: u64,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
}

/// Places the current cart as an order and clears it.
///
/// Clearing goes through the container, so subscribers (including persistence) see the empty cart.
///
/// # Errors
///
/// Returns [`CartError::EmptyCart`] when there is nothing to check out.
pub fn checkout(cart: &mut CartStore, policy: &PricingPolicy) -> Result<CheckoutReceipt, CartError> {
    if cart.state().is_empty() {
        return Err(CartError::EmptyCart);
    }

    let lines = cart.items().to_vec();
    let summary = OrderSummary::for_items(&lines, policy);
    let stamp = next_order_stamp();
    let receipt = CheckoutReceipt {
        order_ref: stamp.reference,
        placed_at_unix_ms: stamp.placed_at_unix_ms,
        lines,
        summary,
    };
    cart.clear_cart();
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use storefront_host::{InlineTaskSpawner, MemoryKeyValueStore, Money, Product};

    use super::*;
    use crate::{model::CartStoreConfig, sync::PersistenceSync};

    fn product(id: u64, cents: u64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_cents(cents))
    }

    #[test]
    fn checkout_on_empty_cart_is_rejected() {
        let mut cart = CartStore::new();
        assert_eq!(
            checkout(&mut cart, &PricingPolicy::default()),
            Err(CartError::EmptyCart)
        );
    }

    #[test]
    fn checkout_snapshots_lines_and_clears_cart() {
        let store = Rc::new(MemoryKeyValueStore::default());
        let config = CartStoreConfig::default();
        let mut cart = CartStore::new();
        PersistenceSync::new(store.clone(), InlineTaskSpawner, &config).attach(&mut cart);
        cart.add_item(&product(1, 2500), 2).expect("add");
        cart.add_item(&product(2, 999), 1).expect("add");
        let expected_lines = cart.items().to_vec();

        let receipt = checkout(&mut cart, &PricingPolicy::default()).expect("checkout");

        assert_eq!(receipt.lines, expected_lines);
        assert_eq!(receipt.summary.subtotal, Money::from_cents(5999));
        assert_eq!(receipt.summary.item_count, 3);
        assert!(receipt.order_ref.starts_with("ORD-"));
        assert!(cart.items().is_empty());

        let restored = block_on(CartStore::rehydrate(&*store, &config));
        assert!(restored.items().is_empty());
    }

    #[test]
    fn consecutive_orders_get_distinct_references() {
        let mut cart = CartStore::new();
        cart.add_item(&product(1, 100), 1).expect("add");
        let first = checkout(&mut cart, &PricingPolicy::default()).expect("first");
        cart.add_item(&product(1, 100), 1).expect("add");
        let second = checkout(&mut cart, &PricingPolicy::default()).expect("second");

        assert_ne!(first.order_ref, second.order_ref);
    }
}
