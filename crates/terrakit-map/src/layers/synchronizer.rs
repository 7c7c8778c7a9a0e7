//! Layer synchronizer: reconciles the registry state against the render
//! surface.
//!
//! The diff is computed purely from the previous and next active arrays;
//! application order matters for visual stacking (removals, then additions,
//! then updates). Resolution failures are recovered by self-eviction and a
//! missing render layer is tolerated as a no-op: the surface is a derived
//! mirror, never authoritative.

use std::sync::Arc;

use super::model::LayersState;
use super::resource::GeoResourceResolver;
use super::store::SharedLayerStore;
use crate::surface::{RenderLayer, RenderSurface};
use terrakit_core::store::SubscriptionId;

/// Minimal set of operations carrying a state transition onto the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerDiff {
    /// Ids present in next but not in previous, in next order.
    pub added: Vec<String>,
    /// Ids present in previous but not in next, in previous order.
    pub removed: Vec<String>,
    /// Ids present in both; opacity, visibility or order may have changed.
    pub updated: Vec<String>,
}

impl LayerDiff {
    /// Whether the transition requires no surface mutation.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

/// Computes the add/remove/update sets by id membership.
pub fn diff(
    previous: &[super::model::Layer],
    next: &[super::model::Layer],
) -> LayerDiff {
    let added = next
        .iter()
        .filter(|layer| !previous.iter().any(|p| p.id == layer.id))
        .map(|layer| layer.id.clone())
        .collect();
    let removed = previous
        .iter()
        .filter(|layer| !next.iter().any(|n| n.id == layer.id))
        .map(|layer| layer.id.clone())
        .collect();
    let updated = next
        .iter()
        .filter(|layer| previous.iter().any(|p| p.id == layer.id))
        .map(|layer| layer.id.clone())
        .collect();
    LayerDiff {
        added,
        removed,
        updated,
    }
}

/// Number of surface positions reserved below the active layers.
fn background_offset(state: &LayersState) -> usize {
    usize::from(state.background.is_some())
}

/// Applies registry transitions to a live render surface.
pub struct LayerSynchronizer {
    surface: Arc<dyn RenderSurface>,
    resolver: Arc<dyn GeoResourceResolver>,
    store: SharedLayerStore,
}

impl LayerSynchronizer {
    /// Creates a synchronizer over a surface, a resolver and the store it
    /// dispatches compensations back to.
    pub fn new(
        surface: Arc<dyn RenderSurface>,
        resolver: Arc<dyn GeoResourceResolver>,
        store: SharedLayerStore,
    ) -> Self {
        Self {
            surface,
            resolver,
            store,
        }
    }

    /// Subscribes to the store; every slice change spawns a reconcile pass.
    pub fn attach(self: &Arc<Self>) -> SubscriptionId {
        let synchronizer = Arc::clone(self);
        self.store.subscribe(move |previous, next| {
            let synchronizer = Arc::clone(&synchronizer);
            let previous = previous.clone();
            let next = next.clone();
            tokio::spawn(async move {
                synchronizer.sync(&previous, &next).await;
            });
        })
    }

    /// Brings the surface into agreement with `next`, given that it
    /// currently mirrors `previous`.
    pub async fn sync(&self, previous: &LayersState, next: &LayersState) {
        self.sync_background(previous, next).await;

        let delta = diff(&previous.active, &next.active);
        if delta.is_empty() {
            return;
        }
        tracing::debug!(
            added = delta.added.len(),
            removed = delta.removed.len(),
            updated = delta.updated.len(),
            "reconciling layer collection"
        );

        for id in &delta.removed {
            if self.surface.take_layer(id).is_none() {
                tracing::debug!(%id, "render layer already absent on remove");
            }
        }

        for id in &delta.added {
            self.add_layer(id).await;
        }

        for id in &delta.updated {
            let Some(layer) = next.layer(id) else {
                continue;
            };
            // Property mutation alone cannot change draw order; reinsert at
            // the new position.
            if let Some(mut render_layer) = self.surface.take_layer(id) {
                render_layer.opacity = layer.opacity;
                render_layer.visible = layer.visible;
                self.surface
                    .insert_layer(layer.z_index + background_offset(next), render_layer);
            } else {
                tracing::debug!(%id, "render layer missing on update");
            }
        }
    }

    /// Resolves and inserts one added layer; evicts it from the registry
    /// when the source cannot be resolved.
    async fn add_layer(&self, id: &str) {
        let Some(resource) = self.resolver.by_id(id).await else {
            tracing::warn!(%id, "layer source unresolvable, evicting");
            self.store.remove_layer(id);
            return;
        };

        // The registry may have moved on while the resolution was in
        // flight; a layer that is no longer wanted is silently discarded.
        let current = self.store.state();
        let Some(layer) = current.layer(id) else {
            tracing::debug!(%id, "stale resolution discarded");
            return;
        };

        self.surface.insert_layer(
            layer.z_index + background_offset(&current),
            RenderLayer::from_resource(&resource, layer),
        );
    }

    /// Reconciles the background slot. The background occupies position 0
    /// and is never part of the active-layer diff.
    async fn sync_background(&self, previous: &LayersState, next: &LayersState) {
        if previous.background == next.background {
            return;
        }

        if let Some(old) = &previous.background {
            self.surface.take_layer(old);
        }

        let Some(id) = &next.background else {
            return;
        };
        let Some(resource) = self.resolver.by_id(id).await else {
            tracing::warn!(%id, "background source unresolvable, clearing");
            self.store.change_background(None);
            return;
        };
        if self.store.state().background.as_deref() != Some(id.as_str()) {
            tracing::debug!(%id, "stale background resolution discarded");
            return;
        }

        let mut layer = super::model::Layer::new(id.clone());
        layer.label = resource.label.clone();
        self.surface
            .insert_layer(0, RenderLayer::from_resource(&resource, &layer));
    }
}
