//! Render surface contract.
//!
//! The render surface is the imperative engine's live collection of layers
//! and overlays. Draw order is defined by collection position, not by a
//! z-index attribute, so reordering is realized by remove-and-reinsert.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::layers::model::Layer;
use crate::layers::resource::GeoResource;
use crate::overlays::types::SharedOverlay;

/// A live render-layer object on the surface, matched to registry layers by
/// its id tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub id: String,
    pub label: String,
    pub opacity: f64,
    pub visible: bool,
}

impl RenderLayer {
    /// Builds a render layer from a resolved resource, applying the
    /// declarative layer's presentation properties.
    pub fn from_resource(resource: &GeoResource, layer: &Layer) -> Self {
        Self {
            id: layer.id.clone(),
            label: if layer.label.is_empty() {
                resource.label.clone()
            } else {
                layer.label.clone()
            },
            opacity: layer.opacity,
            visible: layer.visible,
        }
    }
}

/// Contract of the imperative rendering engine.
///
/// The registry is authoritative; the surface is a derived, best-effort
/// mirror. Implementations use interior mutability so reconciliation can
/// run over a shared handle.
pub trait RenderSurface: Send + Sync {
    /// Attaches an overlay to the surface.
    fn add_overlay(&self, overlay: SharedOverlay);

    /// Detaches an overlay; tolerated as a no-op when unknown.
    fn remove_overlay(&self, overlay: &SharedOverlay);

    /// Inserts a render layer at the given collection position (clamped to
    /// append).
    fn insert_layer(&self, index: usize, layer: RenderLayer);

    /// Removes and returns the render layer with the given id tag, if
    /// present.
    fn take_layer(&self, id: &str) -> Option<RenderLayer>;

    /// The id tags of the layer collection in draw order.
    fn layer_ids(&self) -> Vec<String>;

    /// Number of layers on the surface.
    fn layer_count(&self) -> usize;

    /// Current view resolution in map units per pixel.
    fn resolution(&self) -> f64;
}

/// In-memory render surface.
///
/// Drives the engine without a rendering backend: the integration tests and
/// the demo binary run against it.
#[derive(Debug)]
pub struct MemorySurface {
    layers: RwLock<Vec<RenderLayer>>,
    overlays: RwLock<Vec<SharedOverlay>>,
    resolution: RwLock<f64>,
}

impl MemorySurface {
    /// Creates a surface with a view resolution of one map unit per pixel.
    pub fn new() -> Self {
        Self::with_resolution(1.0)
    }

    /// Creates a surface with the given view resolution.
    pub fn with_resolution(resolution: f64) -> Self {
        Self {
            layers: RwLock::new(Vec::new()),
            overlays: RwLock::new(Vec::new()),
            resolution: RwLock::new(resolution),
        }
    }

    /// Changes the view resolution (zoom).
    pub fn set_resolution(&self, resolution: f64) {
        *self.resolution.write() = resolution;
    }

    /// Snapshot of the layer collection in draw order.
    pub fn layers(&self) -> Vec<RenderLayer> {
        self.layers.read().clone()
    }

    /// Number of attached overlays.
    pub fn overlay_count(&self) -> usize {
        self.overlays.read().len()
    }

    /// Whether the given overlay handle is attached.
    pub fn contains_overlay(&self, overlay: &SharedOverlay) -> bool {
        self.overlays
            .read()
            .iter()
            .any(|attached| Arc::ptr_eq(attached, overlay))
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MemorySurface {
    fn add_overlay(&self, overlay: SharedOverlay) {
        self.overlays.write().push(overlay);
    }

    fn remove_overlay(&self, overlay: &SharedOverlay) {
        self.overlays
            .write()
            .retain(|attached| !Arc::ptr_eq(attached, overlay));
    }

    fn insert_layer(&self, index: usize, layer: RenderLayer) {
        let mut layers = self.layers.write();
        let index = index.min(layers.len());
        layers.insert(index, layer);
    }

    fn take_layer(&self, id: &str) -> Option<RenderLayer> {
        let mut layers = self.layers.write();
        let position = layers.iter().position(|layer| layer.id == id)?;
        Some(layers.remove(position))
    }

    fn layer_ids(&self) -> Vec<String> {
        self.layers.read().iter().map(|l| l.id.clone()).collect()
    }

    fn layer_count(&self) -> usize {
        self.layers.read().len()
    }

    fn resolution(&self) -> f64 {
        *self.resolution.read()
    }
}
