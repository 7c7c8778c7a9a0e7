use terrakit_map::layers::model::{LayerConstraints, LayerProperties, LayersState};
use terrakit_map::layers::registry;

fn assert_dense_indices(state: &LayersState) {
    let indices: Vec<usize> = state.active.iter().map(|l| l.z_index).collect();
    let expected: Vec<usize> = (0..state.active.len()).collect();
    assert_eq!(indices, expected, "z-indices must be dense 0..n-1");
}

#[test]
fn test_add_assigns_defaults_and_index() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());

    assert_eq!(state.active.len(), 1);
    let layer = &state.active[0];
    assert_eq!(layer.id, "id0");
    assert_eq!(layer.z_index, 0);
    assert_eq!(layer.opacity, 1.0);
    assert!(layer.visible);
    assert_dense_indices(&state);
}

#[test]
fn test_add_at_requested_index() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let state = registry::add(&state, "id1", &LayerProperties::at_index(0));

    assert_eq!(state.active[0].id, "id1");
    assert_eq!(state.active[1].id, "id0");
    assert_dense_indices(&state);
}

#[test]
fn test_add_duplicate_is_noop() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let next = registry::add(
        &state,
        "id0",
        &LayerProperties {
            opacity: Some(0.2),
            ..LayerProperties::default()
        },
    );

    assert_eq!(next, state);
}

#[test]
fn test_add_index_past_end_appends() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let state = registry::add(&state, "id1", &LayerProperties::at_index(99));

    assert_eq!(state.active[1].id, "id1");
    assert_dense_indices(&state);
}

#[test]
fn test_remove_reindexes_remainder() {
    let mut state = LayersState::default();
    for id in ["a", "b", "c"] {
        state = registry::add(&state, id, &LayerProperties::default());
    }

    let state = registry::remove(&state, "b");
    assert_eq!(
        state.active.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert_dense_indices(&state);
}

#[test]
fn test_remove_absent_is_noop() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let next = registry::remove(&state, "missing");
    assert_eq!(next, state);
}

#[test]
fn test_modify_moves_layer_to_requested_index() {
    // The documented scenario: id1 sits at 0, id0 at 1; moving id0 to the
    // front swaps them.
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let state = registry::add(&state, "id1", &LayerProperties::at_index(0));
    let state = registry::modify(&state, "id0", &LayerProperties::at_index(0));

    assert_eq!(state.active[0].id, "id0");
    assert_eq!(state.active[1].id, "id1");
    assert_dense_indices(&state);
}

#[test]
fn test_modify_absent_is_noop() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let next = registry::modify(&state, "missing", &LayerProperties::at_index(0));
    assert_eq!(next, state);
}

#[test]
fn test_modify_clamps_negative_index() {
    let mut state = LayersState::default();
    for id in ["a", "b", "c"] {
        state = registry::add(&state, id, &LayerProperties::default());
    }

    let state = registry::modify(&state, "c", &LayerProperties::at_index(-5));
    assert_eq!(state.active[0].id, "c");
    assert_dense_indices(&state);
}

#[test]
fn test_modify_clamps_opacity() {
    let state = registry::add(&LayersState::default(), "id0", &LayerProperties::default());
    let state = registry::modify(
        &state,
        "id0",
        &LayerProperties {
            opacity: Some(7.5),
            ..LayerProperties::default()
        },
    );
    assert_eq!(state.active[0].opacity, 1.0);
}

#[test]
fn test_always_top_layers_stay_last() {
    let top_props = LayerProperties {
        constraints: Some(LayerConstraints {
            always_top: true,
            hidden: false,
        }),
        // A requested index must not beat the constraint.
        z_index: Some(0),
        ..LayerProperties::default()
    };

    let state = registry::add(&LayersState::default(), "base", &LayerProperties::default());
    let state = registry::add(&state, "pin", &top_props);
    let state = registry::add(&state, "roads", &LayerProperties::at_index(0));

    assert_eq!(
        state.active.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
        vec!["roads", "base", "pin"]
    );
    assert_dense_indices(&state);

    // Moving a normal layer past the pinned one keeps the pin on top.
    let state = registry::modify(&state, "base", &LayerProperties::at_index(5));
    assert_eq!(state.active.last().unwrap().id, "pin");
    assert_dense_indices(&state);
}

#[test]
fn test_always_top_preserves_relative_insertion_order() {
    let top = |_: usize| LayerProperties {
        constraints: Some(LayerConstraints {
            always_top: true,
            hidden: false,
        }),
        ..LayerProperties::default()
    };

    let mut state = LayersState::default();
    state = registry::add(&state, "pin-a", &top(0));
    state = registry::add(&state, "pin-b", &top(1));
    state = registry::add(&state, "base", &LayerProperties::at_index(0));

    assert_eq!(
        state.active.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
        vec!["base", "pin-a", "pin-b"]
    );
}

#[test]
fn test_hidden_layers_keep_ordering_slot() {
    let hidden = LayerProperties {
        constraints: Some(LayerConstraints {
            always_top: false,
            hidden: true,
        }),
        ..LayerProperties::default()
    };

    let state = registry::add(&LayersState::default(), "internal", &hidden);
    let state = registry::add(&state, "visible", &LayerProperties::default());

    assert_eq!(state.active.len(), 2);
    let ui: Vec<&str> = state.visible_for_ui().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ui, vec!["visible"]);
    assert_dense_indices(&state);
}

#[test]
fn test_change_background_is_unconditional() {
    let state = registry::change_background(&LayersState::default(), Some("aerial"));
    assert_eq!(state.background.as_deref(), Some("aerial"));

    let state = registry::change_background(&state, Some("topo"));
    assert_eq!(state.background.as_deref(), Some("topo"));

    let state = registry::change_background(&state, None);
    assert_eq!(state.background, None);
}

#[test]
fn test_state_serde_round_trip() {
    let state = registry::add(
        &LayersState::default(),
        "id0",
        &LayerProperties {
            label: Some("Roads".into()),
            opacity: Some(0.5),
            ..LayerProperties::default()
        },
    );
    let state = registry::change_background(&state, Some("topo"));

    let json = serde_json::to_string(&state).unwrap();
    let restored: LayersState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_invariants_hold_over_random_sequences() {
    let mut state = LayersState::default();
    state = registry::add(&state, "a", &LayerProperties::default());
    state = registry::add(&state, "b", &LayerProperties::at_index(0));
    state = registry::modify(&state, "a", &LayerProperties::at_index(0));
    state = registry::add(
        &state,
        "pin",
        &LayerProperties {
            constraints: Some(LayerConstraints {
                always_top: true,
                hidden: false,
            }),
            ..LayerProperties::default()
        },
    );
    state = registry::remove(&state, "b");
    state = registry::modify(&state, "a", &LayerProperties::at_index(9));
    state = registry::add(&state, "c", &LayerProperties::at_index(1));

    assert_dense_indices(&state);
    let pin_index = state.position("pin").unwrap();
    for layer in &state.active {
        if !layer.constraints.always_top {
            assert!(layer.z_index < pin_index);
        }
    }
}
