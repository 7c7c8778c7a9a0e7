//! Geo-resource resolution.
//!
//! A `GeoResource` describes the backing data source of a layer. Resolution
//! is the engine's one asynchronous boundary: the synchronizer resolves ids
//! while the registry may keep changing underneath it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of backing data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoResourceKind {
    Raster,
    Vector,
}

/// Description of a layer's backing data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResource {
    pub id: String,
    pub label: String,
    pub kind: GeoResourceKind,
    /// Attribution line shown by the viewer, if the source requires one.
    pub attribution: Option<String>,
}

impl GeoResource {
    /// Creates a resource description.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: GeoResourceKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            attribution: None,
        }
    }

    /// Sets the attribution line.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }
}

/// Resolver contract for layer data sources.
///
/// `None` means the source cannot be resolved; the synchronizer reacts by
/// evicting the layer from the registry rather than failing.
#[async_trait]
pub trait GeoResourceResolver: Send + Sync {
    /// Resolves a resource by id.
    async fn by_id(&self, id: &str) -> Option<GeoResource>;
}

/// In-memory resolver over a fixed resource set.
///
/// Backs the tests and the demo driver; a production deployment would put a
/// remote catalogue behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    resources: HashMap<String, GeoResource>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver over the given resources.
    pub fn with_resources(resources: impl IntoIterator<Item = GeoResource>) -> Self {
        Self {
            resources: resources
                .into_iter()
                .map(|resource| (resource.id.clone(), resource))
                .collect(),
        }
    }

    /// Registers a resource, replacing any previous one with the same id.
    pub fn register(&mut self, resource: GeoResource) {
        self.resources.insert(resource.id.clone(), resource);
    }
}

#[async_trait]
impl GeoResourceResolver for StaticResolver {
    async fn by_id(&self, id: &str) -> Option<GeoResource> {
        self.resources.get(id).cloned()
    }
}
