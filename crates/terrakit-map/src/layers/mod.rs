//! Declarative layer state and its reconciliation against the surface.

pub mod model;
pub mod registry;
pub mod resource;
pub mod store;
pub mod synchronizer;

pub use model::{Layer, LayerConstraints, LayerProperties, LayersState};
pub use resource::{GeoResource, GeoResourceKind, GeoResourceResolver, StaticResolver};
pub use store::{LayerStore, SharedLayerStore};
pub use synchronizer::{diff, LayerDiff, LayerSynchronizer};
