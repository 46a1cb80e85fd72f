//! Render model: read-only views of the scene for the host to paint.
//!
//! The host owns the actual DOM nodes. This module turns typed element state
//! into what those nodes need (inline style, transform string, handle
//! affordances) and into the layer-list view. It never mutates the scene.
//! [`inline_style`] is shared with the markup export so the live canvas and
//! the exported document position elements identically.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::config::EditorConfig;
use crate::doc::{Element, ElementId, Scene};
use crate::geometry::Point;
use crate::hit;

/// One handle affordance on the selected element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleView {
    /// `"top-left"` .. `"bottom-right"`, or `"rotate"`.
    pub kind: &'static str,
    /// Canvas-local x of the handle center.
    pub x: f64,
    /// Canvas-local y of the handle center.
    pub y: f64,
}

/// Everything the host needs to paint one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementView {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub width: f64,
    pub height: f64,
    pub transform: String,
    pub background: String,
    pub z_index: usize,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Handle affordances; empty unless this element is selected.
    pub handles: Vec<HandleView>,
}

/// One row of the layer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerEntry {
    pub id: ElementId,
    pub label: String,
    pub selected: bool,
}

/// Views for every element, bottom-most first (paint order).
#[must_use]
pub fn scene_view(scene: &Scene, selected: Option<&ElementId>, config: &EditorConfig) -> Vec<ElementView> {
    scene
        .iter()
        .map(|element| element_view(element, selected == Some(&element.id), config))
        .collect()
}

/// View for a single element.
#[must_use]
pub fn element_view(element: &Element, selected: bool, config: &EditorConfig) -> ElementView {
    ElementView {
        id: element.id.clone(),
        kind: element.kind.type_name(),
        width: element.size.width,
        height: element.size.height,
        transform: element.transform().to_string(),
        background: element.effective_background(config).to_owned(),
        z_index: element.z_index,
        selected,
        content: element.content().map(str::to_owned),
        handles: if selected { handles(element) } else { Vec::new() },
    }
}

/// Resize and rotate affordances for `element`, in canvas-local space.
#[must_use]
pub fn handles(element: &Element) -> Vec<HandleView> {
    let mut out: Vec<HandleView> = hit::resize_handle_positions(element)
        .into_iter()
        .map(|(dir, pos)| handle_view(dir.name(), pos))
        .collect();
    out.push(handle_view("rotate", hit::rotate_handle_position(element)));
    out
}

fn handle_view(kind: &'static str, pos: Point) -> HandleView {
    HandleView { kind, x: pos.x, y: pos.y }
}

/// Layer-list rows, top-most first.
#[must_use]
pub fn layers(scene: &Scene, selected: Option<&ElementId>) -> Vec<LayerEntry> {
    scene
        .iter()
        .rev()
        .map(|element| LayerEntry {
            id: element.id.clone(),
            label: layer_label(element),
            selected: selected == Some(&element.id),
        })
        .collect()
}

fn layer_label(element: &Element) -> String {
    match element.content() {
        Some(text) if !text.trim().is_empty() => {
            let preview: String = text.trim().chars().take(20).collect();
            format!("Text: {preview}")
        }
        Some(_) => "Text".to_owned(),
        None => "Rectangle".to_owned(),
    }
}

/// Inline CSS placing `element` absolutely, with its transform pivoting on
/// the box center. Position comes only from the transform; `left`/`top` stay 0.
#[must_use]
pub fn inline_style(element: &Element, config: &EditorConfig) -> String {
    format!(
        "position: absolute; left: 0; top: 0; width: {}px; height: {}px; background-color: {}; transform: {}; transform-origin: center center;",
        element.size.width,
        element.size.height,
        element.effective_background(config),
        element.transform(),
    )
}
