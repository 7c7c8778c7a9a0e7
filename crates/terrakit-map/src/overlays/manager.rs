//! Generic overlay lifecycle management.
//!
//! The manager tracks overlays attached to a bound render surface and
//! offers bulk add/remove/reset. It does not own overlay lifetimes; the
//! owning feature does. Concrete overlay policies implement `OverlayPolicy`
//! on top of it.

use std::sync::Arc;

use terrakit_core::error::{OverlayError, Result};

use crate::features::SharedFeature;
use crate::overlays::types::SharedOverlay;
use crate::surface::RenderSurface;

/// Per-feature overlay policy.
///
/// The extension points of the lifecycle manager: a concrete policy decides
/// which overlays a feature gets and how they are torn down.
pub trait OverlayPolicy {
    /// Creates (or refreshes) the overlays a feature should carry.
    fn create_for(&mut self, feature: &SharedFeature) -> Result<()>;

    /// Removes every overlay owned by the feature and clears its slots.
    fn remove_from(&mut self, feature: &SharedFeature) -> Result<()>;
}

/// Tracks overlays attached to a render surface.
///
/// Two states: inactive (no surface ever bound; `add`/`remove` fail) and
/// active. `deactivate` clears tracking but keeps the surface bound, so
/// deactivate/reactivate cycles need not re-supply it.
#[derive(Default)]
pub struct OverlayManager {
    surface: Option<Arc<dyn RenderSurface>>,
    overlays: Vec<SharedOverlay>,
}

impl OverlayManager {
    /// Creates an inactive manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a surface, establishing a clean slate: overlays tracked
    /// against a previously bound surface are removed first.
    pub fn activate(&mut self, surface: Arc<dyn RenderSurface>) {
        self.reset();
        self.surface = Some(surface);
    }

    /// Removes every tracked overlay from the surface and clears tracking.
    /// The surface stays bound.
    pub fn deactivate(&mut self) {
        self.reset();
    }

    /// Removes all tracked overlays from the surface and clears the list.
    pub fn reset(&mut self) {
        if let Some(surface) = &self.surface {
            for overlay in &self.overlays {
                surface.remove_overlay(overlay);
            }
        }
        self.overlays.clear();
    }

    /// Whether a surface has been bound.
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// The bound surface, if any.
    pub fn surface(&self) -> Option<Arc<dyn RenderSurface>> {
        self.surface.clone()
    }

    /// Tracks an overlay and attaches it to the surface.
    ///
    /// No duplicate detection; callers must not add the same overlay twice.
    pub fn add(&mut self, overlay: SharedOverlay) -> Result<()> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(OverlayError::SurfaceNotBound)?;
        surface.add_overlay(overlay.clone());
        self.overlays.push(overlay);
        Ok(())
    }

    /// Stops tracking an overlay (by identity) and detaches it from the
    /// surface. No-op when the overlay is not tracked.
    pub fn remove(&mut self, overlay: &SharedOverlay) -> Result<()> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(OverlayError::SurfaceNotBound)?;
        surface.remove_overlay(overlay);
        self.overlays
            .retain(|tracked| !Arc::ptr_eq(tracked, overlay));
        Ok(())
    }

    /// Invokes `f` once per tracked overlay, in tracked order.
    pub fn apply<F>(&self, mut f: F)
    where
        F: FnMut(&SharedOverlay),
    {
        for overlay in &self.overlays {
            f(overlay);
        }
    }

    /// Defensive copy of the tracked list.
    pub fn overlays(&self) -> Vec<SharedOverlay> {
        self.overlays.clone()
    }

    /// Number of tracked overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether no overlays are tracked.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl std::fmt::Debug for OverlayManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayManager")
            .field("active", &self.is_active())
            .field("tracked", &self.overlays.len())
            .finish()
    }
}
