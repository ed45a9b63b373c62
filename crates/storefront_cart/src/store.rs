//! The cart state container: owned state, typed operations, and change subscriptions.

use std::fmt;

use leptos::logging;
use storefront_host::{KeyValueStore, Money, Product, ProductId};

use crate::{
    model::{CartLine, CartState, CartStoreConfig, CART_LOAD_ERROR},
    persistence::{rehydrate_cart, CartEnvelope},
    reducer::{reduce_cart, CartAction, CartEffect, CartError},
};

/// Notification delivered to subscribers after every successfully applied action.
#[derive(Debug, Clone, Copy)]
pub struct CartChange<'a> {
    /// State after the action.
    pub state: &'a CartState,
    /// Effects the action requested.
    pub effects: &'a [CartEffect],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`CartStore::subscribe`] for later removal.
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CartChange<'_>)>;

/// Ready-phase cart container.
///
/// A `CartStore` only exists once its initial state is known: either empty ([`CartStore::new`])
/// or rehydrated from a backing store ([`CartStore::rehydrate`]). Mutations therefore never race
/// rehydration.
///
/// Subscribers run synchronously inside each mutation and receive the new state. They must not
/// call back into the store.
pub struct CartStore {
    state: CartState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription_id: u64,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::from_state(CartState::default())
    }

    /// Creates a cart holding `items`. Lines are adopted as given.
    pub(crate) fn from_state(state: CartState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription_id: 1,
        }
    }

    /// Reads the persisted cart from `store` and returns a ready container.
    ///
    /// Never fails. Unreadable or unmigratable data yields an empty cart (or the lines that
    /// survived validation) with [`CART_LOAD_ERROR`] recorded as the transient error.
    pub async fn rehydrate<S: KeyValueStore + ?Sized>(store: &S, config: &CartStoreConfig) -> Self {
        let rehydrated = rehydrate_cart(store, &config.storage_key).await;
        Self::from_state(CartState {
            items: rehydrated.items,
            is_loading: false,
            error: rehydrated.error.map(|_| CART_LOAD_ERROR.to_string()),
        })
    }

    /// Registers a callback run after every applied action.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CartChange<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Applies an action, then notifies subscribers.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from [`reduce_cart`]; subscribers are not notified in that case.
    pub fn dispatch(&mut self, action: CartAction) -> Result<Vec<CartEffect>, CartError> {
        let effects = reduce_cart(&mut self.state, action)?;
        let change = CartChange {
            state: &self.state,
            effects: &effects,
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change);
        }
        Ok(effects)
    }

    fn apply(&mut self, action: CartAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("cart reducer error: {err}");
        }
    }

    /// Adds `quantity` units of `product`, merging into its existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a zero quantity and
    /// [`CartError::QuantityOverflow`] when the line's counter would overflow.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.add_item_with_options(product, quantity, None, None)
    }

    /// Adds a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] when the line is already at its maximum.
    pub fn add_one(&mut self, product: &Product) -> Result<(), CartError> {
        self.add_item(product, 1)
    }

    /// Like [`CartStore::add_item`], recording variant attributes on a newly created line.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_item_with_options(
        &mut self,
        product: &Product,
        quantity: u32,
        color: Option<String>,
        size: Option<u32>,
    ) -> Result<(), CartError> {
        self.dispatch(CartAction::AddItem {
            product: product.clone(),
            quantity,
            color,
            size,
        })
        .map(drop)
    }

    pub fn remove_item(&mut self, product_id: ProductId) {
        self.apply(CartAction::RemoveItem { product_id });
    }

    /// Sets a line's quantity; zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] when `quantity` exceeds the line counter range.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CartError> {
        self.dispatch(CartAction::UpdateQuantity {
            product_id,
            quantity,
        })
        .map(drop)
    }

    pub fn clear_cart(&mut self) {
        self.apply(CartAction::ClearCart);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.apply(CartAction::SetLoading { loading });
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.apply(CartAction::SetError { error });
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartLine] {
        self.state.items()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.state.line(product_id)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn total_item_count(&self) -> u64 {
        self.state.total_item_count()
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.state.quantity_of(product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.state.contains(product_id)
    }

    /// Returns the envelope that would be persisted for the current state.
    pub fn envelope(&self) -> CartEnvelope {
        CartEnvelope::current(self.state.items())
    }
}
