//! Shared constants for the terrakit engine.

use std::time::Duration;

/// Default delay for the trailing-edge debouncer that rate-limits
/// resolution-driven recomputation (partition counts during zoom gestures).
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

/// Minimum on-screen spacing between partition labels, in pixels.
/// Partition spacing is coarsened until it projects to at least this many
/// pixels at the current view resolution.
pub const MIN_PARTITION_PIXEL_SPACING: f64 = 200.0;

/// Default opacity for newly added layers.
pub const DEFAULT_LAYER_OPACITY: f64 = 1.0;
