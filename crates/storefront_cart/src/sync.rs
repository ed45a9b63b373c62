//! Write-behind persistence of cart contents to a [`KeyValueStore`].

use std::rc::Rc;

use leptos::logging;
use storefront_host::{KeyValueStore, TaskSpawner};

use crate::{
    model::{CartState, CartStoreConfig},
    persistence::encode_envelope,
    reducer::CartEffect,
    store::{CartStore, SubscriptionId},
};

/// Persists the cart envelope whenever the container reports [`CartEffect::PersistCart`].
///
/// Writes are spawned and never awaited by the mutation that caused them. Failures are logged and
/// otherwise ignored; the in-memory cart stays authoritative. Later writes replace earlier ones, so
/// the stored envelope converges on the latest state once the spawner has drained.
pub struct PersistenceSync<S, T> {
    store: Rc<S>,
    spawner: T,
    key: Rc<str>,
}

impl<S, T> PersistenceSync<S, T>
where
    S: KeyValueStore + 'static,
    T: TaskSpawner + 'static,
{
    pub fn new(store: Rc<S>, spawner: T, config: &CartStoreConfig) -> Self {
        Self {
            store,
            spawner,
            key: Rc::from(config.storage_key.as_str()),
        }
    }

    /// Spawns a write of `state.items`.
    pub fn persist(&self, state: &CartState) {
        let raw = match encode_envelope(state.items()) {
            Ok(raw) => raw,
            Err(err) => {
                logging::warn!("cart envelope encode failed: {err}");
                return;
            }
        };
        let store = Rc::clone(&self.store);
        let key = Rc::clone(&self.key);
        self.spawner.spawn(Box::pin(async move {
            if let Err(err) = store.save_raw(&key, &raw).await {
                logging::warn!("persist cart failed: {err}");
            }
        }));
    }

    /// Subscribes to `cart`, persisting after every change that requests it.
    pub fn attach(self, cart: &mut CartStore) -> SubscriptionId {
        cart.subscribe(move |change| {
            if change.effects.contains(&CartEffect::PersistCart) {
                self.persist(change.state);
            }
        })
    }
}
