//! Leptos context wiring that hands the cart container to views.
//!
//! The container is constructed explicitly by the entry layer and injected here; views never reach
//! for a global. A revision signal is bumped after every mutation so reads made through
//! [`CartContext::with_cart`] re-run reactively.

use std::rc::Rc;

use leptos::*;
use storefront_host::{KeyValueStore, TaskSpawner};

use crate::{
    checkout::{checkout, CheckoutReceipt},
    model::CartStoreConfig,
    reducer::CartError,
    store::CartStore,
    summary::{OrderSummary, PricingPolicy},
    sync::PersistenceSync,
};

#[derive(Clone, Copy)]
/// Leptos context for reading the cart reactively and mutating it.
pub struct CartContext {
    /// Ready cart container.
    pub cart: StoredValue<CartStore>,
    /// Bumped after every call to [`CartContext::update_cart`].
    pub revision: RwSignal<u64>,
    /// Shipping and tax rules for the order summary.
    pub pricing: StoredValue<PricingPolicy>,
}

impl CartContext {
    /// Wraps a ready container. Must be called inside a reactive runtime.
    pub fn new(cart: CartStore) -> Self {
        Self {
            cart: store_value(cart),
            revision: create_rw_signal(0),
            pricing: store_value(PricingPolicy::default()),
        }
    }

    /// Reads the cart and subscribes the calling scope to later changes.
    pub fn with_cart<O>(&self, f: impl FnOnce(&CartStore) -> O) -> O {
        self.revision.track();
        self.cart.with_value(f)
    }

    /// Mutates the cart, then notifies readers.
    ///
    /// The revision is bumped only after the container borrow has been released.
    pub fn update_cart<O>(&self, f: impl FnOnce(&mut CartStore) -> O) -> Option<O> {
        let output = self.cart.try_update_value(f);
        self.revision.update(|revision| *revision = revision.wrapping_add(1));
        output
    }

    pub fn item_count(&self) -> u64 {
        self.with_cart(CartStore::total_item_count)
    }

    pub fn summary(&self) -> OrderSummary {
        let policy = self.pricing.get_value();
        self.with_cart(|cart| OrderSummary::for_items(cart.items(), &policy))
    }

    /// Runs local checkout against the injected pricing policy.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] when the cart has no lines and
    /// [`CartError::Unavailable`] when the context has been disposed.
    pub fn checkout(&self) -> Result<CheckoutReceipt, CartError> {
        let policy = self.pricing.try_get_value().unwrap_or_default();
        self.update_cart(|cart| checkout(cart, &policy))
            .unwrap_or_else(|| {
                logging::warn!("checkout attempted on a disposed cart context");
                Err(CartError::Unavailable)
            })
    }
}

/// Provides `cart` to descendant views and returns the context handle.
pub fn provide_cart_context(cart: CartStore) -> CartContext {
    let context = CartContext::new(cart);
    provide_context(context);
    context
}

/// Rehydrates the cart from `store`, attaches write-behind persistence on `spawner`, and provides
/// it as context.
///
/// Rehydration is driven to completion before this returns, so no mutation can observe a
/// half-loaded cart. `store` must answer its reads without waiting on the event loop.
pub fn provide_persistent_cart<S, T>(
    store: Rc<S>,
    spawner: T,
    config: &CartStoreConfig,
) -> CartContext
where
    S: KeyValueStore + 'static,
    T: TaskSpawner + 'static,
{
    let mut cart = futures::executor::block_on(CartStore::rehydrate(store.as_ref(), config));
    PersistenceSync::new(store, spawner, config).attach(&mut cart);
    provide_cart_context(cart)
}

/// [`provide_persistent_cart`] over the host store and spawner selected for this build.
///
/// The browser store is `localStorage`, whose reads complete synchronously.
pub fn provide_browser_cart(config: &CartStoreConfig) -> CartContext {
    provide_persistent_cart(
        Rc::new(storefront_host_web::key_value_store()),
        storefront_host_web::task_spawner(),
        config,
    )
}

/// Returns the current [`CartContext`].
///
/// # Panics
///
/// Panics if called outside a scope where [`provide_cart_context`] ran.
pub fn use_cart_context() -> CartContext {
    use_context::<CartContext>().expect("CartContext not provided")
}
