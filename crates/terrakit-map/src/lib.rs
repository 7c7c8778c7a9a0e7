//! # Terrakit Map
//!
//! The layer-ordering and overlay-reconciliation engine of the terrakit
//! map viewer.
//!
//! ## Core Components
//!
//! - **Layer registry**: pure transitions over the ordered active-layer
//!   collection; dense z-indexing with an always-top constraint.
//! - **Layer synchronizer**: diffs registry transitions and applies the
//!   minimal add/remove/reorder set to the live render surface, with
//!   self-healing eviction of unresolvable sources.
//! - **Overlay lifecycle manager**: tracks overlays bound to a surface;
//!   concrete policies implement per-feature creation and teardown.
//! - **Measurement overlays**: distance/area readouts and zoom-dependent
//!   distance partitions, with manual drag positions persisted on the
//!   owning feature.
//!
//! ## Architecture
//!
//! ```text
//! LayerStore (declarative state, single source of truth)
//!   └── LayerSynchronizer ── diff ──> RenderSurface (imperative mirror)
//!
//! Feature (geometry + overlay slots)
//!   └── MeasurementOverlayManager ──> RenderSurface overlays
//! ```

pub mod features;
pub mod layers;
pub mod overlays;
pub mod surface;

pub use features::{Feature, SharedFeature};
pub use layers::{
    diff, GeoResource, GeoResourceKind, GeoResourceResolver, Layer, LayerConstraints, LayerDiff,
    LayerProperties, LayerStore, LayerSynchronizer, LayersState, SharedLayerStore, StaticResolver,
};
pub use overlays::{
    MeasurementConfig, MeasurementOverlayManager, Overlay, OverlayManager, OverlayPolicy,
    OverlayType, SharedOverlay,
};
pub use surface::{MemorySurface, RenderLayer, RenderSurface};
