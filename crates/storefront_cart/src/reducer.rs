//! Reducer actions, side-effect intents, and transition logic for the cart.

use storefront_host::{Product, ProductId};
use thiserror::Error;

use crate::model::{CartLine, CartState};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_cart`] to mutate [`CartState`].
pub enum CartAction {
    /// Add `quantity` units of a product, merging into an existing line when present.
    AddItem {
        /// Product to copy into the cart.
        product: Product,
        /// Units to add; must be at least 1.
        quantity: u32,
        /// Variant color recorded on a newly created line.
        color: Option<String>,
        /// Variant size recorded on a newly created line.
        size: Option<u32>,
    },
    /// Remove a product's line if present.
    RemoveItem {
        /// Product whose line is removed.
        product_id: ProductId,
    },
    /// Set a line's quantity to an absolute value; zero or below removes the line.
    UpdateQuantity {
        /// Product whose line is updated.
        product_id: ProductId,
        /// New absolute quantity.
        quantity: i64,
    },
    /// Remove every line.
    ClearCart,
    /// Set the transient loading flag.
    SetLoading {
        /// Whether a cart-related operation is in flight.
        loading: bool,
    },
    /// Set or clear the transient error message.
    SetError {
        /// Message to show, or `None` to clear.
        error: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_cart`] for subscribers to execute.
pub enum CartEffect {
    /// Persist the current `items` to the backing store.
    PersistCart,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors for rejected cart operations. A rejected operation leaves the state untouched.
pub enum CartError {
    /// `add_item` was called with a quantity of zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// The requested quantity does not fit a line's counter.
    #[error("quantity for product {product_id} is out of range")]
    QuantityOverflow {
        /// Product whose line would overflow.
        product_id: ProductId,
    },
    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,
    /// The cart handle was used after its reactive owner was disposed.
    #[error("cart is no longer available")]
    Unavailable,
}

/// Applies a [`CartAction`] to the cart state and collects resulting side effects.
///
/// Every item-changing action clears the transient error and emits [`CartEffect::PersistCart`],
/// including ones that turn out to be no-ops (removing an absent product). Transient setters emit
/// nothing.
///
/// # Errors
///
/// Returns [`CartError::ZeroQuantity`] or [`CartError::QuantityOverflow`] for arguments that would
/// break the one-line-per-product, quantity-at-least-one invariants. The state is not modified in
/// that case.
pub fn reduce_cart(state: &mut CartState, action: CartAction) -> Result<Vec<CartEffect>, CartError> {
    match action {
        CartAction::AddItem {
            product,
            quantity,
            color,
            size,
        } => {
            if quantity == 0 {
                return Err(CartError::ZeroQuantity);
            }
            let product_id = product.id;
            match state.items.iter_mut().find(|line| line.id() == product_id) {
                Some(line) => {
                    line.quantity = line
                        .quantity
                        .checked_add(quantity)
                        .ok_or(CartError::QuantityOverflow { product_id })?;
                }
                None => state.items.push(CartLine {
                    product,
                    color,
                    size,
                    quantity,
                }),
            }
        }
        CartAction::RemoveItem { product_id } => {
            state.items.retain(|line| line.id() != product_id);
        }
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if quantity <= 0 {
                state.items.retain(|line| line.id() != product_id);
            } else {
                let quantity = u32::try_from(quantity)
                    .map_err(|_| CartError::QuantityOverflow { product_id })?;
                if let Some(line) = state.items.iter_mut().find(|line| line.id() == product_id) {
                    line.quantity = quantity;
                }
            }
        }
        CartAction::ClearCart => state.items.clear(),
        CartAction::SetLoading { loading } => {
            state.is_loading = loading;
            return Ok(Vec::new());
        }
        CartAction::SetError { error } => {
            state.error = error;
            return Ok(Vec::new());
        }
    }

    state.error = None;
    Ok(vec![CartEffect::PersistCart])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use storefront_host::Money;

    use super::*;

    fn product(id: u64, cents: u64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_cents(cents))
    }

    fn add(state: &mut CartState, product: Product, quantity: u32) -> Vec<CartEffect> {
        reduce_cart(
            state,
            CartAction::AddItem {
                product,
                quantity,
                color: None,
                size: None,
            },
        )
        .expect("add item")
    }

    fn ids(state: &CartState) -> Vec<u64> {
        state.items.iter().map(|line| line.id().0).collect()
    }

    #[test]
    fn adding_same_product_merges_quantities() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 2);
        add(&mut state, product(1, 1000), 3);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.quantity_of(ProductId(1)), 5);
    }

    #[test]
    fn repeated_adds_keep_one_line_per_product_in_insertion_order() {
        let mut state = CartState::default();
        for id in [3, 1, 3, 2, 1, 3] {
            add(&mut state, product(id, 100), 1);
        }

        assert_eq!(ids(&state), vec![3, 1, 2]);
        assert_eq!(state.quantity_of(ProductId(3)), 3);
        assert_eq!(state.total_item_count(), 6);
    }

    #[test]
    fn add_with_zero_quantity_is_rejected_without_change() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 1);
        let before = state.clone();

        let err = reduce_cart(
            &mut state,
            CartAction::AddItem {
                product: product(2, 500),
                quantity: 0,
                color: None,
                size: None,
            },
        )
        .expect_err("zero quantity");

        assert_eq!(err, CartError::ZeroQuantity);
        assert_eq!(state, before);
    }

    #[test]
    fn add_overflow_is_rejected_without_change() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1), u32::MAX);

        let err = reduce_cart(
            &mut state,
            CartAction::AddItem {
                product: product(1, 1),
                quantity: 1,
                color: None,
                size: None,
            },
        )
        .expect_err("overflow");

        assert_eq!(
            err,
            CartError::QuantityOverflow {
                product_id: ProductId(1)
            }
        );
        assert_eq!(state.quantity_of(ProductId(1)), u32::MAX);
    }

    #[test]
    fn variant_attributes_are_kept_from_the_first_add() {
        let mut state = CartState::default();
        reduce_cart(
            &mut state,
            CartAction::AddItem {
                product: product(5, 4500),
                quantity: 1,
                color: Some("navy".to_string()),
                size: Some(40),
            },
        )
        .expect("add with options");
        reduce_cart(
            &mut state,
            CartAction::AddItem {
                product: product(5, 4500),
                quantity: 1,
                color: Some("olive".to_string()),
                size: None,
            },
        )
        .expect("add again");

        let line = state.line(ProductId(5)).expect("line");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.color.as_deref(), Some("navy"));
        assert_eq!(line.size, Some(40));
    }

    #[test]
    fn update_quantity_sets_absolute_value() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 2);

        reduce_cart(
            &mut state,
            CartAction::UpdateQuantity {
                product_id: ProductId(1),
                quantity: 5,
            },
        )
        .expect("update");

        assert_eq!(state.quantity_of(ProductId(1)), 5);
    }

    #[test]
    fn update_quantity_to_zero_or_below_removes_line() {
        for quantity in [0, -1, i64::MIN] {
            let mut state = CartState::default();
            add(&mut state, product(1, 1000), 2);
            add(&mut state, product(2, 1000), 1);

            reduce_cart(
                &mut state,
                CartAction::UpdateQuantity {
                    product_id: ProductId(1),
                    quantity,
                },
            )
            .expect("update to floor");

            assert_eq!(ids(&state), vec![2]);
            assert!(state.items.iter().all(|line| line.quantity >= 1));
        }
    }

    #[test]
    fn update_quantity_for_absent_product_is_noop() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 2);
        let before = state.items.clone();

        reduce_cart(
            &mut state,
            CartAction::UpdateQuantity {
                product_id: ProductId(9),
                quantity: 4,
            },
        )
        .expect("update absent");

        assert_eq!(state.items, before);
    }

    #[test]
    fn update_quantity_beyond_line_range_is_rejected() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 2);

        let err = reduce_cart(
            &mut state,
            CartAction::UpdateQuantity {
                product_id: ProductId(1),
                quantity: i64::from(u32::MAX) + 1,
            },
        )
        .expect_err("too large");

        assert!(matches!(err, CartError::QuantityOverflow { .. }));
        assert_eq!(state.quantity_of(ProductId(1)), 2);
    }

    #[test]
    fn remove_absent_product_is_not_an_error() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 1);

        let effects = reduce_cart(
            &mut state,
            CartAction::RemoveItem {
                product_id: ProductId(2),
            },
        )
        .expect("remove absent");

        assert_eq!(ids(&state), vec![1]);
        assert_eq!(effects, vec![CartEffect::PersistCart]);
    }

    #[test]
    fn item_actions_clear_error_and_request_persistence() {
        let mut state = CartState::default();
        reduce_cart(
            &mut state,
            CartAction::SetError {
                error: Some("boom".to_string()),
            },
        )
        .expect("set error");

        let effects = add(&mut state, product(1, 1000), 1);
        assert_eq!(effects, vec![CartEffect::PersistCart]);
        assert_eq!(state.error, None);
    }

    #[test]
    fn transient_setters_do_not_request_persistence() {
        let mut state = CartState::default();
        let loading = reduce_cart(&mut state, CartAction::SetLoading { loading: true })
            .expect("set loading");
        let error = reduce_cart(
            &mut state,
            CartAction::SetError {
                error: Some("offline".to_string()),
            },
        )
        .expect("set error");

        assert!(loading.is_empty());
        assert!(error.is_empty());
        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[test]
    fn clear_cart_is_idempotent() {
        let mut state = CartState::default();
        add(&mut state, product(1, 1000), 2);

        reduce_cart(&mut state, CartAction::ClearCart).expect("clear");
        let once = state.clone();
        reduce_cart(&mut state, CartAction::ClearCart).expect("clear again");

        assert_eq!(state, once);
        assert_eq!(state.total_item_count(), 0);
        assert_eq!(state.total_price(), Money::ZERO);
    }
}
