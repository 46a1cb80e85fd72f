#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::Size;

fn scene_with(elements: Vec<Element>) -> Scene {
    let mut scene = Scene::new();
    for e in elements {
        scene.push(e);
    }
    scene
}

fn rect(id: &str) -> Element {
    Element::rectangle(ElementId::from(id), Size::new(150.0, 100.0))
}

fn text(id: &str, content: &str) -> Element {
    let mut e = Element::text(ElementId::from(id), Size::new(200.0, 40.0));
    e.set_content(content);
    e
}

// =============================================================
// Element views
// =============================================================

#[test]
fn view_carries_transform_and_effective_color() {
    let config = EditorConfig::default();
    let mut e = rect("elem-1");
    e.position = Point::new(10.0, 20.0);
    e.rotation = 15.0;
    let view = element_view(&e, false, &config);
    assert_eq!(view.transform, "translate(10px, 20px) rotate(15deg)");
    assert_eq!(view.background, "#4a90e2");
    assert_eq!(view.kind, "rectangle");
    assert!(view.handles.is_empty());
    assert!(view.content.is_none());
}

#[test]
fn only_selected_view_has_handles() {
    let config = EditorConfig::default();
    let scene = scene_with(vec![rect("a"), rect("b")]);
    let sel = ElementId::from("b");
    let views = scene_view(&scene, Some(&sel), &config);
    assert!(views[0].handles.is_empty());
    assert!(!views[0].selected);
    assert!(views[1].selected);
    let kinds: Vec<&str> = views[1].handles.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, ["top-left", "top-right", "bottom-left", "bottom-right", "rotate"]);
}

#[test]
fn scene_view_is_paint_order() {
    let config = EditorConfig::default();
    let scene = scene_with(vec![rect("a"), rect("b"), rect("c")]);
    let views = scene_view(&scene, None, &config);
    let z: Vec<usize> = views.iter().map(|v| v.z_index).collect();
    assert_eq!(z, [0, 1, 2]);
}

#[test]
fn view_serializes_type_tag() {
    let config = EditorConfig::default();
    let view = element_view(&text("elem-1", "Hi"), false, &config);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["type"], "textbox");
    assert_eq!(json["content"], "Hi");
}

// =============================================================
// Layers
// =============================================================

#[test]
fn layers_are_topmost_first() {
    let scene = scene_with(vec![rect("a"), text("b", "  Hello world  "), text("c", "")]);
    let sel = ElementId::from("a");
    let rows = layers(&scene, Some(&sel));
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a"]);
    assert_eq!(rows[0].label, "Text");
    assert_eq!(rows[1].label, "Text: Hello world");
    assert_eq!(rows[2].label, "Rectangle");
    assert!(rows[2].selected);
    assert!(!rows[0].selected);
}

#[test]
fn layers_of_empty_scene() {
    assert!(layers(&Scene::new(), None).is_empty());
}

// =============================================================
// Inline style
// =============================================================

#[test]
fn inline_style_uses_transform_for_position() {
    let config = EditorConfig::default();
    let mut e = rect("elem-1");
    e.position = Point::new(30.0, 40.0);
    e.style.background = Some("red".into());
    let style = inline_style(&e, &config);
    assert!(style.contains("left: 0; top: 0;"));
    assert!(style.contains("width: 150px; height: 100px;"));
    assert!(style.contains("background-color: red;"));
    assert!(style.contains("transform: translate(30px, 40px) rotate(0deg);"));
    assert!(style.contains("transform-origin: center center;"));
}
