//! Overlay data model.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use terrakit_core::geo::Coordinate;
use uuid::Uuid;

/// The role of a positioned annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayType {
    /// Total distance readout of a measured line.
    Distance,
    /// Enclosed-area readout of a closed polygon.
    Area,
    /// Intermediate distance label along a measured line.
    Partition,
    /// Fixed annotation text.
    StaticText,
    /// Tool help bubble following the pointer.
    Help,
}

/// A positioned, typed annotation bound to a point on the render surface.
///
/// An overlay is exclusively owned by one feature at a time; the lifecycle
/// manager tracks it for bulk attach/detach but does not own it.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: Uuid,
    pub kind: OverlayType,
    /// Position in the render surface's projection.
    pub position: Coordinate,
    /// Rendered label content.
    pub text: String,
    /// True when the user dragged the overlay away from its algorithmic
    /// placement; such positions survive re-renders.
    pub manual_positioning: bool,
}

impl Overlay {
    /// Creates an algorithmically placed overlay.
    pub fn new(kind: OverlayType, position: Coordinate, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            text: text.into(),
            manual_positioning: false,
        }
    }
}

/// Shared overlay handle; feature slots and the manager's tracked list hold
/// the same allocation, compared by identity.
pub type SharedOverlay = Arc<RwLock<Overlay>>;

/// Wraps an overlay into a shared handle.
pub fn shared(overlay: Overlay) -> SharedOverlay {
    Arc::new(RwLock::new(overlay))
}
