//! Typed store facade for the layers state slice.
//!
//! Commands are fire-and-forget: each dispatch applies the matching
//! registry transition and the store notifies subscribers with the full
//! previous and next slice. No-op transitions notify nobody.

use std::sync::Arc;

use terrakit_core::store::{Store, SubscriptionId};

use super::model::{LayerProperties, LayersState};
use super::registry;

/// Observable store holding the `LayersState` slice.
#[derive(Debug, Default)]
pub struct LayerStore {
    inner: Store<LayersState>,
}

impl LayerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with an initial state.
    pub fn with_state(initial: LayersState) -> Self {
        Self {
            inner: Store::new(initial),
        }
    }

    /// Snapshot of the current layers slice.
    pub fn state(&self) -> LayersState {
        self.inner.state()
    }

    /// Dispatches an add-layer command.
    pub fn add_layer(&self, id: &str, properties: &LayerProperties) {
        tracing::debug!(%id, "dispatch add-layer");
        self.inner.update(|state| registry::add(state, id, properties));
    }

    /// Dispatches a remove-layer command.
    pub fn remove_layer(&self, id: &str) {
        tracing::debug!(%id, "dispatch remove-layer");
        self.inner.update(|state| registry::remove(state, id));
    }

    /// Dispatches a modify-layer command with a partial property patch.
    pub fn modify_layer(&self, id: &str, properties: &LayerProperties) {
        tracing::debug!(%id, "dispatch modify-layer");
        self.inner
            .update(|state| registry::modify(state, id, properties));
    }

    /// Dispatches a change-background command.
    pub fn change_background(&self, id: Option<&str>) {
        tracing::debug!(background = ?id, "dispatch change-background");
        self.inner
            .update(|state| registry::change_background(state, id));
    }

    /// Subscribes to slice changes; the handler receives the previous and
    /// the next state.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&LayersState, &LayersState) + Send + Sync + 'static,
    {
        self.inner.subscribe(handler)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }
}

/// Shared handle to a layer store.
pub type SharedLayerStore = Arc<LayerStore>;
