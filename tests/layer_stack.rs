use egui::Color32;
use inkverse::error::EditorError;
use inkverse::stack::LayerStack;

#[test]
fn new_stack_starts_with_an_opaque_white_background() {
    let stack = LayerStack::new(16, 16);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.active_index(), 0);
    assert_eq!(stack.active_layer().name(), "Background");
    assert_eq!(stack.active_layer().surface().pixel(8, 8), Color32::WHITE);
}

#[test]
fn added_layers_are_transparent_numbered_and_active() {
    let mut stack = LayerStack::new(16, 16);
    let first = stack.add_layer(None);
    let second = stack.add_layer(Some("Inks"));
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.active_index(), 2);
    assert_eq!(stack.layer(1).unwrap().name(), "Layer 2");
    assert_eq!(stack.layer(2).unwrap().name(), "Inks");
    // ids are monotonic in creation order
    assert!(second > first);
    assert_eq!(
        stack.layer(1).unwrap().surface().pixel(0, 0),
        Color32::TRANSPARENT
    );
}

#[test]
fn deleting_the_last_layer_is_rejected_and_changes_nothing() {
    let mut stack = LayerStack::new(8, 8);
    let id = stack.active_layer().id();
    let result = stack.delete_layer(0);
    assert!(matches!(result, Err(EditorError::InvalidOperation)));
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.active_layer().id(), id);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let mut stack = LayerStack::new(8, 8);
    assert!(matches!(
        stack.select_layer(3),
        Err(EditorError::OutOfRange { index: 3, count: 1 })
    ));
    assert!(matches!(
        stack.delete_layer(9),
        Err(EditorError::OutOfRange { .. })
    ));
    assert!(matches!(
        stack.set_visibility(1, false),
        Err(EditorError::OutOfRange { .. })
    ));
    assert!(matches!(
        stack.set_opacity(1, 0.5),
        Err(EditorError::OutOfRange { .. })
    ));
}

#[test]
fn delete_reclamps_the_active_index() {
    let mut stack = LayerStack::new(8, 8);
    stack.add_layer(None);
    stack.add_layer(None);
    assert_eq!(stack.active_index(), 2);
    stack.delete_layer(2).unwrap();
    assert_eq!(stack.active_index(), 1);
    stack.delete_layer(0).unwrap();
    assert!(stack.active_index() < stack.len());
}

#[test]
fn any_add_delete_sequence_keeps_the_invariants() {
    let mut stack = LayerStack::new(8, 8);
    for round in 0..40 {
        if round % 3 == 0 {
            stack.add_layer(None);
        } else {
            let target = round % stack.len();
            let _ = stack.delete_layer(target);
        }
        assert!(stack.len() >= 1, "stack emptied at round {round}");
        assert!(
            stack.active_index() < stack.len(),
            "active index escaped at round {round}"
        );
    }
}

#[test]
fn opacity_is_clamped_into_the_unit_interval() {
    let mut stack = LayerStack::new(8, 8);
    stack.set_opacity(0, 2.5).unwrap();
    assert_eq!(stack.active_layer().opacity(), 1.0);
    stack.set_opacity(0, -1.0).unwrap();
    assert_eq!(stack.active_layer().opacity(), 0.0);
    stack.set_opacity(0, 0.37).unwrap();
    assert_eq!(stack.active_layer().opacity(), 0.37);
}
