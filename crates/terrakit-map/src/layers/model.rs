//! Layer data model.
//!
//! A `Layer` is the declarative description of one renderable data source
//! bound into the map. The registry owns ordering: `z_index` is assigned by
//! the transition functions, never by callers.

use serde::{Deserialize, Serialize};
use terrakit_core::constants::DEFAULT_LAYER_OPACITY;

/// Ordering and enumeration constraints on a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConstraints {
    /// Always ordered after every unconstrained layer, regardless of any
    /// requested z-index.
    pub always_top: bool,
    /// Excluded from UI enumeration but still present in the ordering.
    pub hidden: bool,
}

/// One renderable data source bound into the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique within the active collection.
    pub id: String,
    /// Display label; may be empty.
    pub label: String,
    pub visible: bool,
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Dense position within the active collection, `0..n-1`. Maintained by
    /// the registry transitions.
    pub z_index: usize,
    pub constraints: LayerConstraints,
}

impl Layer {
    /// Creates a layer with default properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            visible: true,
            opacity: DEFAULT_LAYER_OPACITY,
            z_index: 0,
            constraints: LayerConstraints::default(),
        }
    }

    /// Applies a partial property patch, clamping opacity into [0, 1].
    /// The requested z-index is interpreted by the registry, not here.
    pub fn apply(&mut self, properties: &LayerProperties) {
        if let Some(label) = &properties.label {
            self.label = label.clone();
        }
        if let Some(visible) = properties.visible {
            self.visible = visible;
        }
        if let Some(opacity) = properties.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(constraints) = properties.constraints {
            self.constraints = constraints;
        }
    }
}

/// Caller-supplied partial layer properties for add/modify transitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerProperties {
    pub label: Option<String>,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    /// Requested position. Negative values are clamped to the front by the
    /// registry; values past the end append.
    pub z_index: Option<i64>,
    pub constraints: Option<LayerConstraints>,
}

impl LayerProperties {
    /// Shorthand for a patch that only requests a position.
    pub fn at_index(z_index: i64) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }
}

/// The layers slice of the store: the ordered active collection plus the
/// background layer id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayersState {
    pub active: Vec<Layer>,
    pub background: Option<String>,
}

impl LayersState {
    /// Whether a layer with this id is in the active collection.
    pub fn contains(&self, id: &str) -> bool {
        self.active.iter().any(|layer| layer.id == id)
    }

    /// Position of a layer in the active collection.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.active.iter().position(|layer| layer.id == id)
    }

    /// Looks up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.active.iter().find(|layer| layer.id == id)
    }

    /// Active layers for UI enumeration: hidden layers are skipped but keep
    /// their ordering slot.
    pub fn visible_for_ui(&self) -> Vec<&Layer> {
        self.active
            .iter()
            .filter(|layer| !layer.constraints.hidden)
            .collect()
    }
}
