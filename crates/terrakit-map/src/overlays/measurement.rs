//! Measurement overlays: distance, area and distance partitions.
//!
//! Overlays are derived from feature geometry and cached on the feature, so
//! geometry edits and zoom changes mutate the existing set instead of
//! rebuilding it. Partition counts depend on both geometry length and view
//! resolution; recomputation during zoom gestures is rate-limited through a
//! trailing-edge debouncer.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use terrakit_core::constants::{DEFAULT_DEBOUNCE_DELAY, MIN_PARTITION_PIXEL_SPACING};
use terrakit_core::error::{OverlayError, Result};
use terrakit_core::geo::{Coordinate, Geometry};
use terrakit_core::Debouncer;

use crate::features::SharedFeature;
use crate::overlays::manager::{OverlayManager, OverlayPolicy};
use crate::overlays::types::{shared, Overlay, OverlayType, SharedOverlay};
use crate::surface::RenderSurface;

/// Partition spacing bands: `(minimum length, base spacing)` in map units,
/// ordered longest first. Lengths at or below the last band stay a single
/// partition.
const PARTITION_BANDS: &[(f64, f64)] = &[(2000.0, 1000.0), (200.0, 100.0), (20.0, 10.0)];

/// Tuning knobs for the measurement overlay manager.
#[derive(Debug, Clone)]
pub struct MeasurementConfig {
    /// Settle delay for resolution-driven partition recomputation.
    pub debounce_delay: Duration,
    /// Minimum legible on-screen spacing between partition labels.
    pub min_partition_pixel_spacing: f64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            min_partition_pixel_spacing: MIN_PARTITION_PIXEL_SPACING,
        }
    }
}

/// Derives the partition count for a geometry length at a view resolution.
///
/// The base spacing comes from the band table; it is then coarsened in
/// decades until the projected spacing is legible at the current
/// resolution. When no legible spacing shorter than the geometry exists,
/// the count collapses to 1 and the single distance overlay summarizes the
/// line.
pub fn partition_count(length: f64, resolution: f64, min_pixel_spacing: f64) -> usize {
    if length <= 0.0 || resolution <= 0.0 {
        return 1;
    }
    let Some(base) = PARTITION_BANDS
        .iter()
        .find(|(min_length, _)| length > *min_length)
        .map(|(_, spacing)| *spacing)
    else {
        return 1;
    };

    let mut spacing = base;
    while spacing / resolution < min_pixel_spacing {
        spacing *= 10.0;
        if spacing >= length {
            return 1;
        }
    }
    ((length / spacing).floor() as usize).max(1)
}

/// Formats a distance in map units (meters) for display.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.1} m", meters)
    }
}

/// Formats an area in square map units for display.
pub fn format_area(square_meters: f64) -> String {
    if square_meters >= 1_000_000.0 {
        format!("{:.2} km\u{b2}", square_meters / 1_000_000.0)
    } else {
        format!("{:.1} m\u{b2}", square_meters)
    }
}

/// The linear length used for partitioning. A polygon whose ring is not
/// closed cannot be broken into a round number of spatial segments, so it
/// is penalized to a single partition.
fn partition_length(geometry: &Geometry) -> Option<f64> {
    if geometry.is_polygon() && !geometry.is_closed() {
        return None;
    }
    Some(geometry.length())
}

/// Anchor for the distance overlay: last vertex, or the centroid for
/// closed geometry.
fn distance_anchor(geometry: &Geometry) -> Option<Coordinate> {
    if geometry.is_closed() {
        geometry.centroid()
    } else {
        geometry.last_vertex()
    }
}

/// Creates and destroys distance, area and partition overlays as feature
/// geometry and view resolution change.
pub struct MeasurementOverlayManager {
    inner: OverlayManager,
    config: MeasurementConfig,
    debounce: Arc<Debouncer>,
}

impl MeasurementOverlayManager {
    /// Creates a manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MeasurementConfig::default())
    }

    /// Creates a manager with custom tuning.
    pub fn with_config(config: MeasurementConfig) -> Self {
        let debounce = Arc::new(Debouncer::new(config.debounce_delay));
        Self {
            inner: OverlayManager::new(),
            config,
            debounce,
        }
    }

    /// Binds the render surface. See [`OverlayManager::activate`].
    pub fn activate(&mut self, surface: Arc<dyn RenderSurface>) {
        self.inner.activate(surface);
    }

    /// Clears tracked overlays without unbinding the surface.
    pub fn deactivate(&mut self) {
        self.inner.deactivate();
    }

    /// Whether a surface is bound.
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Defensive copy of the tracked overlay list.
    pub fn overlays(&self) -> Vec<SharedOverlay> {
        self.inner.overlays()
    }

    /// Invokes `f` once per tracked overlay, in tracked order.
    pub fn apply<F>(&self, f: F)
    where
        F: FnMut(&SharedOverlay),
    {
        self.inner.apply(f)
    }

    /// Ensures the feature carries a distance overlay.
    ///
    /// Idempotent: a feature that already has one is left untouched. The
    /// overlay is anchored at the last vertex, or at the centroid for
    /// closed geometry, and stored as `feature.measurement`.
    pub fn create_distance_overlay(&mut self, feature: &SharedFeature) -> Result<()> {
        let mut feature = feature.write();
        if feature.measurement.is_some() {
            return Ok(());
        }

        let anchor = distance_anchor(&feature.geometry).ok_or(OverlayError::EmptyGeometry {
            kind: "distance".into(),
        })?;
        let overlay = shared(Overlay::new(
            OverlayType::Distance,
            anchor,
            format_distance(feature.geometry.length()),
        ));
        self.inner.add(overlay.clone())?;
        feature.measurement = Some(overlay);
        Ok(())
    }

    /// Ensures a closed polygon carries an area overlay, and removes the
    /// overlay when the geometry has changed away from a closed polygon.
    ///
    /// Type eligibility can change after creation (polygon sketched back
    /// into a line), so this runs on every geometry-change event.
    pub fn create_or_remove_area_overlay(&mut self, feature: &SharedFeature) -> Result<()> {
        let mut feature = feature.write();
        if feature.geometry.is_closed() {
            if feature.area.is_none() {
                let centroid =
                    feature
                        .geometry
                        .centroid()
                        .ok_or(OverlayError::EmptyGeometry {
                            kind: "area".into(),
                        })?;
                let overlay = shared(Overlay::new(
                    OverlayType::Area,
                    centroid,
                    format_area(feature.geometry.area()),
                ));
                self.inner.add(overlay.clone())?;
                feature.area = Some(overlay);
            }
        } else if let Some(overlay) = feature.area.take() {
            self.inner.remove(&overlay)?;
        }
        Ok(())
    }

    /// Reconciles the feature's partition overlays against the current
    /// geometry length and view resolution.
    ///
    /// When the required count matches the existing one the overlays are
    /// left untouched, so resolution nudges inside a band cause no churn.
    /// A count change discards and recreates them evenly spaced at
    /// `length / count` intervals.
    pub fn create_partition_overlays(&mut self, feature: &SharedFeature) -> Result<()> {
        let surface = self.inner.surface().ok_or(OverlayError::SurfaceNotBound)?;
        let resolution = surface.resolution();

        let mut feature = feature.write();
        if feature.geometry.coordinates().is_empty() {
            let stale = std::mem::take(&mut feature.partitions);
            for overlay in &stale {
                self.inner.remove(overlay)?;
            }
            return Ok(());
        }

        let (length, count) = match partition_length(&feature.geometry) {
            Some(length) => (
                length,
                partition_count(length, resolution, self.config.min_partition_pixel_spacing),
            ),
            None => (feature.geometry.length(), 1),
        };
        if feature.partitions.len() == count {
            return Ok(());
        }
        tracing::debug!(
            previous = feature.partitions.len(),
            required = count,
            resolution,
            "rebuilding partition overlays"
        );

        let stale = std::mem::take(&mut feature.partitions);
        for overlay in &stale {
            self.inner.remove(overlay)?;
        }

        let interval = length / count as f64;
        let mut partitions = Vec::with_capacity(count);
        for step in 1..=count {
            let distance = interval * step as f64;
            let Some(position) = feature.geometry.point_along(distance) else {
                break;
            };
            let overlay = shared(Overlay::new(
                OverlayType::Partition,
                position,
                format_distance(distance),
            ));
            self.inner.add(overlay.clone())?;
            partitions.push(overlay);
        }
        feature.partitions = partitions;
        Ok(())
    }

    /// Runs the full per-feature reconciliation after a geometry change:
    /// distance overlay (created if absent, refreshed otherwise), area
    /// eligibility, partitions.
    pub fn on_geometry_changed(&mut self, feature: &SharedFeature) -> Result<()> {
        self.create_distance_overlay(feature)?;
        self.refresh_distance_overlay(feature);
        self.create_or_remove_area_overlay(feature)?;
        self.create_partition_overlays(feature)?;
        Ok(())
    }

    /// Updates the distance overlay's label and, unless the user dragged
    /// it, its anchor position.
    fn refresh_distance_overlay(&self, feature: &SharedFeature) {
        let feature = feature.read();
        let Some(overlay) = &feature.measurement else {
            return;
        };
        let mut overlay = overlay.write();
        overlay.text = format_distance(feature.geometry.length());
        if !overlay.manual_positioning {
            if let Some(anchor) = distance_anchor(&feature.geometry) {
                overlay.position = anchor;
            }
        }
    }

    /// Schedules a debounced partition recomputation for the feature.
    ///
    /// Wire this to the view's resolution-change event: a continuous zoom
    /// gesture collapses into a single recomputation after input settles.
    pub fn schedule_partition_update(this: &Arc<Mutex<Self>>, feature: &SharedFeature) {
        let debounce = this.lock().debounce.clone();
        let manager = Arc::clone(this);
        let feature = Arc::clone(feature);
        debounce.call(move || {
            if let Err(error) = manager.lock().create_partition_overlays(&feature) {
                tracing::warn!(%error, "debounced partition update skipped");
            }
        });
    }

    /// Persists manually dragged overlay positions onto the feature.
    ///
    /// Only the measurement and area roles persist; partitions and static
    /// overlays are always algorithmically placed. A role whose overlay was
    /// not manually positioned stores nothing; absence means "use
    /// algorithmic placement".
    pub fn save_manual_overlay_position(&self, feature: &SharedFeature) {
        let mut feature = feature.write();

        if let Some(overlay) = feature.measurement.clone() {
            let overlay = overlay.read();
            if overlay.manual_positioning {
                feature.measurement_position_x = Some(overlay.position.x);
                feature.measurement_position_y = Some(overlay.position.y);
            }
        }
        if let Some(overlay) = feature.area.clone() {
            let overlay = overlay.read();
            if overlay.manual_positioning {
                feature.area_position_x = Some(overlay.position.x);
                feature.area_position_y = Some(overlay.position.y);
            }
        }
    }

    /// Restores persisted overlay positions from the feature.
    ///
    /// A role restores only when both coordinates are present; partial
    /// state falls back to algorithmic placement. Safe to call while
    /// inactive; the write only becomes visible once a surface is bound.
    pub fn restore_manual_overlay_position(&self, feature: &SharedFeature) {
        let feature = feature.read();

        if let (Some(overlay), Some(x), Some(y)) = (
            &feature.measurement,
            feature.measurement_position_x,
            feature.measurement_position_y,
        ) {
            let mut overlay = overlay.write();
            overlay.position = Coordinate::new(x, y);
            overlay.manual_positioning = true;
        }
        if let (Some(overlay), Some(x), Some(y)) =
            (&feature.area, feature.area_position_x, feature.area_position_y)
        {
            let mut overlay = overlay.write();
            overlay.position = Coordinate::new(x, y);
            overlay.manual_positioning = true;
        }
    }
}

impl Default for MeasurementOverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayPolicy for MeasurementOverlayManager {
    fn create_for(&mut self, feature: &SharedFeature) -> Result<()> {
        self.on_geometry_changed(feature)?;
        self.restore_manual_overlay_position(feature);
        Ok(())
    }

    fn remove_from(&mut self, feature: &SharedFeature) -> Result<()> {
        let mut feature = feature.write();
        if !feature.has_overlays() {
            return Ok(());
        }

        if let Some(overlay) = feature.measurement.take() {
            self.inner.remove(&overlay)?;
        }
        if let Some(overlay) = feature.area.take() {
            self.inner.remove(&overlay)?;
        }
        let partitions = std::mem::take(&mut feature.partitions);
        for overlay in &partitions {
            self.inner.remove(overlay)?;
        }
        Ok(())
    }
}
