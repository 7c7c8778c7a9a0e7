//! Layer registry: pure state transitions over `LayersState`.
//!
//! Every transition returns a new state and preserves the ordering
//! invariant: unconstrained layers first in ascending z-index, always-top
//! layers after them in their relative insertion order, and z-index values
//! re-assigned densely as `0..n-1`.

use super::model::{Layer, LayerProperties, LayersState};

/// Adds a layer built from defaults merged with `properties`.
///
/// Idempotent: adding an id that is already active returns the state
/// unchanged. A requested non-negative z-index inserts at that position
/// (clamped to append) unless the layer is always-top, which always
/// appends.
pub fn add(state: &LayersState, id: &str, properties: &LayerProperties) -> LayersState {
    if state.contains(id) {
        return state.clone();
    }

    let mut layer = Layer::new(id);
    layer.apply(properties);

    let mut active = state.active.clone();
    // Normal layers never insert past the always-top block at the tail.
    let top_start = active
        .iter()
        .position(|l| l.constraints.always_top)
        .unwrap_or(active.len());
    let index = if layer.constraints.always_top {
        active.len()
    } else {
        match properties.z_index {
            Some(z) if z >= 0 => (z as usize).min(top_start),
            _ => top_start,
        }
    };
    active.insert(index, layer);
    reindex(&mut active);

    LayersState {
        active,
        background: state.background.clone(),
    }
}

/// Removes a layer by id and re-indexes the remainder. No-op when absent.
pub fn remove(state: &LayersState, id: &str) -> LayersState {
    if !state.contains(id) {
        return state.clone();
    }

    let mut active: Vec<Layer> = state
        .active
        .iter()
        .filter(|layer| layer.id != id)
        .cloned()
        .collect();
    reindex(&mut active);

    LayersState {
        active,
        background: state.background.clone(),
    }
}

/// Merges `properties` into an existing layer and re-inserts it at the
/// merged position. No-op when the id is absent.
///
/// A negative requested z-index is clamped to the front; the reference
/// behavior left that to callers, the registry now defends against it.
pub fn modify(state: &LayersState, id: &str, properties: &LayerProperties) -> LayersState {
    let Some(position) = state.position(id) else {
        return state.clone();
    };

    let mut active = state.active.clone();
    let mut layer = active.remove(position);
    layer.apply(properties);
    let target = match properties.z_index {
        Some(z) => (z.max(0) as usize).min(active.len()),
        None => position.min(active.len()),
    };
    layer.z_index = target;
    active.insert(target, layer);

    let mut active = sort(active);
    reindex(&mut active);

    LayersState {
        active,
        background: state.background.clone(),
    }
}

/// Replaces the background layer id unconditionally.
pub fn change_background(state: &LayersState, id: Option<&str>) -> LayersState {
    LayersState {
        active: state.active.clone(),
        background: id.map(str::to_owned),
    }
}

/// Partitions into unconstrained and always-top layers, stable-sorts the
/// unconstrained ones by z-index and appends the always-top ones in their
/// relative order.
fn sort(layers: Vec<Layer>) -> Vec<Layer> {
    let (top, mut normal): (Vec<Layer>, Vec<Layer>) = layers
        .into_iter()
        .partition(|layer| layer.constraints.always_top);
    normal.sort_by_key(|layer| layer.z_index);
    normal.extend(top);
    normal
}

/// Assigns `z_index = position` for every layer.
fn reindex(layers: &mut [Layer]) {
    for (index, layer) in layers.iter_mut().enumerate() {
        layer.z_index = index;
    }
}
