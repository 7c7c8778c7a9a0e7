//! # Terrakit
//!
//! An interactive map viewer engine built around two reconciliation loops:
//! a declarative layer list kept in an observable store and mirrored onto
//! an imperative render surface, and measurement overlays derived from
//! feature geometry and cached on the owning features.
//!
//! ## Architecture
//!
//! Terrakit is organized as a workspace with multiple crates:
//!
//! 1. **terrakit-core** - Observable store, geometry, errors, debouncing
//! 2. **terrakit-map** - Layer registry/synchronizer and overlay managers
//! 3. **terrakit** - Binary wiring the crates into a headless driver

pub use terrakit_core::{Coordinate, Debouncer, Error, Geometry, Result, Store, SubscriptionId};

pub use terrakit_map::{
    Feature, GeoResource, GeoResourceKind, GeoResourceResolver, Layer, LayerConstraints,
    LayerDiff, LayerProperties, LayerStore, LayerSynchronizer, LayersState, MeasurementConfig,
    MeasurementOverlayManager, MemorySurface, Overlay, OverlayManager, OverlayPolicy, OverlayType,
    RenderLayer, RenderSurface, SharedFeature, SharedLayerStore, SharedOverlay, StaticResolver,
};

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
