//! Measured features and their overlay property slots.
//!
//! The feature is the source of truth for its overlays: the manager derives
//! them from geometry and caches them here so they are not rebuilt from
//! scratch on every change. Manual overlay positions are persisted per role
//! on the feature so they survive overlay destruction and recreation.

use parking_lot::RwLock;
use std::sync::Arc;
use terrakit_core::geo::Geometry;
use uuid::Uuid;

use crate::overlays::types::SharedOverlay;

/// A drawable feature with measurement overlay slots.
///
/// The position fields are a typed record rather than a dynamic property
/// bag: a partially stored position (one coordinate of two) is explicit and
/// treated as "no manual position".
#[derive(Debug)]
pub struct Feature {
    pub id: Uuid,
    pub geometry: Geometry,

    /// Distance overlay; at most one per feature.
    pub measurement: Option<SharedOverlay>,
    /// Area overlay; at most one per feature, only for closed polygons.
    pub area: Option<SharedOverlay>,
    /// Partition overlays; count is derived from geometry and resolution.
    pub partitions: Vec<SharedOverlay>,

    pub measurement_position_x: Option<f64>,
    pub measurement_position_y: Option<f64>,
    pub area_position_x: Option<f64>,
    pub area_position_y: Option<f64>,
}

impl Feature {
    /// Creates a feature with no overlays.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            measurement: None,
            area: None,
            partitions: Vec::new(),
            measurement_position_x: None,
            measurement_position_y: None,
            area_position_x: None,
            area_position_y: None,
        }
    }

    /// Creates a shared feature handle.
    pub fn shared(geometry: Geometry) -> SharedFeature {
        Arc::new(RwLock::new(Self::new(geometry)))
    }

    /// Replaces the geometry. Overlay reconciliation is the manager's job;
    /// callers follow up with the geometry-change handlers.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Whether any overlay slot is occupied.
    pub fn has_overlays(&self) -> bool {
        self.measurement.is_some() || self.area.is_some() || !self.partitions.is_empty()
    }
}

/// Shared feature handle.
pub type SharedFeature = Arc<RwLock<Feature>>;
