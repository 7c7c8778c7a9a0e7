use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use terrakit_map::layers::model::{LayerProperties, LayersState};
use terrakit_map::layers::registry;
use terrakit_map::layers::resource::{
    GeoResource, GeoResourceKind, GeoResourceResolver, StaticResolver,
};
use terrakit_map::layers::store::LayerStore;
use terrakit_map::layers::synchronizer::{diff, LayerSynchronizer};
use terrakit_map::surface::{MemorySurface, RenderSurface};

fn resolver_for(ids: &[&str]) -> Arc<StaticResolver> {
    Arc::new(StaticResolver::with_resources(ids.iter().map(|id| {
        GeoResource::new(*id, format!("{id} source"), GeoResourceKind::Vector)
    })))
}

fn state_of(ids: &[&str]) -> LayersState {
    let mut state = LayersState::default();
    for id in ids {
        state = registry::add(&state, id, &LayerProperties::default());
    }
    state
}

#[test]
fn test_diff_membership_sets() {
    let previous = state_of(&["a", "b"]);
    let next = state_of(&["b", "c"]);

    let delta = diff(&previous.active, &next.active);
    assert_eq!(delta.added, vec!["c"]);
    assert_eq!(delta.removed, vec!["a"]);
    assert_eq!(delta.updated, vec!["b"]);
}

#[test]
fn test_diff_empty_for_identical_states() {
    let state = state_of(&["a", "b"]);
    assert!(diff(&state.active, &state.active).is_empty());
}

#[tokio::test]
async fn test_sync_adds_layers_in_registry_order() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer = LayerSynchronizer::new(
        surface.clone(),
        resolver_for(&["roads", "rivers"]),
        store.clone(),
    );

    store.add_layer("roads", &LayerProperties::default());
    store.add_layer("rivers", &LayerProperties::default());

    synchronizer
        .sync(&LayersState::default(), &store.state())
        .await;

    assert_eq!(surface.layer_ids(), vec!["roads", "rivers"]);
}

#[tokio::test]
async fn test_sync_applies_presentation_properties() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer =
        LayerSynchronizer::new(surface.clone(), resolver_for(&["roads"]), store.clone());

    store.add_layer(
        "roads",
        &LayerProperties {
            opacity: Some(0.4),
            visible: Some(false),
            ..LayerProperties::default()
        },
    );
    synchronizer
        .sync(&LayersState::default(), &store.state())
        .await;

    let layers = surface.layers();
    assert_eq!(layers[0].opacity, 0.4);
    assert!(!layers[0].visible);
}

#[tokio::test]
async fn test_unresolvable_layer_self_evicts() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    // Resolver knows "roads" but not "ghost".
    let synchronizer =
        LayerSynchronizer::new(surface.clone(), resolver_for(&["roads"]), store.clone());

    store.add_layer("roads", &LayerProperties::default());
    store.add_layer("ghost", &LayerProperties::default());
    synchronizer
        .sync(&LayersState::default(), &store.state())
        .await;

    // The dangling entry is compensated away, never rendered.
    assert!(!store.state().contains("ghost"));
    assert_eq!(surface.layer_ids(), vec!["roads"]);
}

#[tokio::test]
async fn test_update_reorders_by_reinsertion() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer = LayerSynchronizer::new(
        surface.clone(),
        resolver_for(&["roads", "rivers"]),
        store.clone(),
    );

    store.add_layer("roads", &LayerProperties::default());
    store.add_layer("rivers", &LayerProperties::default());
    synchronizer
        .sync(&LayersState::default(), &store.state())
        .await;

    let before = store.state();
    store.modify_layer(
        "rivers",
        &LayerProperties {
            z_index: Some(0),
            opacity: Some(0.7),
            ..LayerProperties::default()
        },
    );
    synchronizer.sync(&before, &store.state()).await;

    assert_eq!(surface.layer_ids(), vec!["rivers", "roads"]);
    assert_eq!(surface.layers()[0].opacity, 0.7);
}

#[tokio::test]
async fn test_removal_of_missing_render_layer_is_tolerated() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer =
        LayerSynchronizer::new(surface.clone(), resolver_for(&["roads"]), store.clone());

    // The surface never saw this layer; removal must be a silent no-op.
    let previous = state_of(&["stray"]);
    synchronizer.sync(&previous, &LayersState::default()).await;
    assert_eq!(surface.layer_count(), 0);
}

#[tokio::test]
async fn test_background_occupies_lowest_position() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer = LayerSynchronizer::new(
        surface.clone(),
        resolver_for(&["topo", "roads"]),
        store.clone(),
    );

    store.change_background(Some("topo"));
    store.add_layer("roads", &LayerProperties::default());
    synchronizer
        .sync(&LayersState::default(), &store.state())
        .await;

    assert_eq!(surface.layer_ids(), vec!["topo", "roads"]);

    // Swapping the background replaces position 0 and leaves the rest.
    let mut resolver = StaticResolver::new();
    resolver.register(GeoResource::new(
        "aerial",
        "Aerial",
        GeoResourceKind::Raster,
    ));
    let previous = store.state();
    store.change_background(Some("aerial"));
    let synchronizer = LayerSynchronizer::new(
        surface.clone(),
        Arc::new(resolver),
        store.clone(),
    );
    synchronizer.sync(&previous, &store.state()).await;

    assert_eq!(surface.layer_ids(), vec!["aerial", "roads"]);
}

/// Resolver that parks every resolution until released, so a registry
/// change can overtake an in-flight resolution.
struct SlowResolver {
    inner: StaticResolver,
    delay: Duration,
}

#[async_trait]
impl GeoResourceResolver for SlowResolver {
    async fn by_id(&self, id: &str) -> Option<GeoResource> {
        tokio::time::sleep(self.delay).await;
        self.inner.by_id(id).await
    }
}

#[tokio::test]
async fn test_stale_resolution_is_discarded() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let resolver = Arc::new(SlowResolver {
        inner: StaticResolver::with_resources([GeoResource::new(
            "roads",
            "Roads",
            GeoResourceKind::Vector,
        )]),
        delay: Duration::from_millis(50),
    });
    let synchronizer = Arc::new(LayerSynchronizer::new(
        surface.clone(),
        resolver,
        store.clone(),
    ));

    store.add_layer("roads", &LayerProperties::default());
    let next = store.state();
    let task = {
        let synchronizer = synchronizer.clone();
        tokio::spawn(async move {
            synchronizer.sync(&LayersState::default(), &next).await;
        })
    };

    // The layer is dropped from the registry while resolution is parked.
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.remove_layer("roads");
    task.await.unwrap();

    assert_eq!(surface.layer_count(), 0);
}

#[tokio::test]
async fn test_attach_reconciles_on_dispatch() {
    let surface = Arc::new(MemorySurface::new());
    let store = Arc::new(LayerStore::new());
    let synchronizer = Arc::new(LayerSynchronizer::new(
        surface.clone(),
        resolver_for(&["roads"]),
        store.clone(),
    ));
    let subscription = synchronizer.attach();
    assert_eq!(store.subscriber_count(), 1);

    store.add_layer("roads", &LayerProperties::default());
    // The attached handler reconciles on a spawned task.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(surface.layer_ids(), vec!["roads"]);

    assert!(store.unsubscribe(subscription));
}
