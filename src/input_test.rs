use super::*;

// =============================================================
// ResizeDirection
// =============================================================

#[test]
fn direction_names_roundtrip() {
    for dir in [
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
    ] {
        assert_eq!(ResizeDirection::from_name(dir.name()), Some(dir));
    }
}

#[test]
fn direction_unknown_name() {
    assert_eq!(ResizeDirection::from_name("middle"), None);
    assert_eq!(ResizeDirection::from_name(""), None);
}

#[test]
fn direction_edges() {
    assert!(ResizeDirection::TopLeft.is_left());
    assert!(ResizeDirection::TopLeft.is_top());
    assert!(!ResizeDirection::BottomRight.is_left());
    assert!(!ResizeDirection::BottomRight.is_top());
    assert!(ResizeDirection::BottomLeft.is_left());
    assert!(!ResizeDirection::BottomLeft.is_top());
}

// =============================================================
// PointerTarget
// =============================================================

#[test]
fn host_targets_parse() {
    assert_eq!(PointerTarget::from_host("canvas", ""), Some(PointerTarget::Canvas));
    assert_eq!(
        PointerTarget::from_host("body", "elem-2"),
        Some(PointerTarget::Body(ElementId::from("elem-2")))
    );
    assert_eq!(PointerTarget::from_host("rotate", ""), Some(PointerTarget::RotateHandle));
    assert_eq!(
        PointerTarget::from_host("bottom-left", ""),
        Some(PointerTarget::ResizeHandle(ResizeDirection::BottomLeft))
    );
}

#[test]
fn host_targets_reject_unknown() {
    assert_eq!(PointerTarget::from_host("body", ""), None);
    assert_eq!(PointerTarget::from_host("handle", "elem-1"), None);
}

// =============================================================
// Key
// =============================================================

#[test]
fn arrow_keys_map_to_unit_steps() {
    assert_eq!(Key("ArrowLeft".into()).arrow_direction(), Some((-1.0, 0.0)));
    assert_eq!(Key("ArrowDown".into()).arrow_direction(), Some((0.0, 1.0)));
    assert_eq!(Key("a".into()).arrow_direction(), None);
}

#[test]
fn delete_key_detected() {
    assert!(Key("Delete".into()).is_delete());
    assert!(!Key("Backspace".into()).is_delete());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn default_is_idle() {
    let state = InputState::default();
    assert_eq!(state.mode(), InteractionMode::Idle);
    assert!(!state.is_active());
    assert!(state.element_id().is_none());
}

#[test]
fn active_states_report_mode_and_element() {
    let id = ElementId::from("elem-1");
    let resizing = InputState::Resizing {
        id: id.clone(),
        direction: ResizeDirection::TopRight,
        start_pointer: Point::default(),
        start_position: Point::default(),
        start_size: Size::new(100.0, 100.0),
    };
    assert_eq!(resizing.mode(), InteractionMode::Resizing(ResizeDirection::TopRight));
    assert_eq!(resizing.element_id(), Some(&id));
    assert!(resizing.is_active());

    let rotating = InputState::Rotating { id, center: Point::default(), start_angle: 0.0, start_rotation: 0.0 };
    assert_eq!(rotating.mode(), InteractionMode::Rotating);
}
