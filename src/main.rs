use std::sync::Arc;
use std::time::Duration;

use terrakit::{
    init_logging, Coordinate, Feature, GeoResource, GeoResourceKind, Geometry, LayerProperties,
    LayerStore, LayerSynchronizer, MeasurementOverlayManager, MemorySurface, RenderSurface,
    StaticResolver,
};

/// Headless driver: wires the store, synchronizer and measurement manager
/// over the in-memory surface and walks through a small session.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let resolver = Arc::new(StaticResolver::with_resources([
        GeoResource::new("topo", "Topographic base map", GeoResourceKind::Raster),
        GeoResource::new("roads", "Road network", GeoResourceKind::Vector),
        GeoResource::new("rivers", "Waterways", GeoResourceKind::Vector),
    ]));
    let surface = Arc::new(MemorySurface::with_resolution(1.0));
    let store = Arc::new(LayerStore::new());

    let synchronizer = Arc::new(LayerSynchronizer::new(
        surface.clone(),
        resolver,
        store.clone(),
    ));
    synchronizer.attach();

    store.change_background(Some("topo"));
    store.add_layer("roads", &LayerProperties::default());
    store.add_layer(
        "rivers",
        &LayerProperties {
            opacity: Some(0.6),
            ..LayerProperties::default()
        },
    );
    // Unresolvable source: the synchronizer evicts it again.
    store.add_layer("missing-source", &LayerProperties::default());
    store.modify_layer("rivers", &LayerProperties::at_index(0));

    // Let the spawned reconcile passes settle.
    tokio::time::sleep(Duration::from_millis(200)).await;
    tracing::info!(
        order = ?surface.layer_ids(),
        active = store.state().active.len(),
        "surface reconciled"
    );

    let mut manager = MeasurementOverlayManager::new();
    manager.activate(surface.clone());
    let feature = Feature::shared(Geometry::LineString(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(8000.0, 0.0),
        Coordinate::new(8000.0, 4345.0),
    ]));
    manager.on_geometry_changed(&feature)?;

    let snapshot = feature.read();
    let distance = snapshot.measurement.as_ref().map(|o| o.read().text.clone());
    tracing::info!(
        distance = distance.as_deref().unwrap_or("-"),
        partitions = snapshot.partitions.len(),
        overlays = surface.overlay_count(),
        "measurement reconciled"
    );

    Ok(())
}
