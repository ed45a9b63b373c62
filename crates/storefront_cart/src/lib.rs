//! Persistent shopping-cart state for the storefront.
//!
//! [`CartStore`] owns the cart and applies typed operations through [`reduce_cart`]. Every
//! item-changing operation is followed by a write-behind save of the versioned envelope (see
//! [`PersistenceSync`]), and a fresh page load restores it with [`CartStore::rehydrate`].

pub mod checkout;
pub mod context;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod store;
pub mod summary;
pub mod sync;
pub mod theme;

pub use checkout::{checkout, CheckoutReceipt};
pub use context::{
    provide_browser_cart, provide_cart_context, provide_persistent_cart, use_cart_context,
    CartContext,
};
pub use model::*;
pub use persistence::{
    decode_cart, encode_envelope, migrate_envelope, rehydrate_cart, CartEnvelope, CartMigration,
    HydrationError, Rehydrated, CART_MIGRATIONS,
};
pub use reducer::{reduce_cart, CartAction, CartEffect, CartError};
pub use store::{CartChange, CartStore, SubscriptionId};
pub use summary::{OrderSummary, PricingPolicy};
pub use sync::PersistenceSync;
pub use theme::{load_theme, save_theme, ThemePreference, THEME_STORAGE_KEY};
