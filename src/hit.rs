//! Hit-testing: which element, and which part of it, sits under a point.
//!
//! Points are canvas-local. Handles only exist on the selected element and
//! are tested before any body, so a handle overlapping another element still
//! wins. Bodies are tested top-most first. All tests honour rotation by
//! mapping the point back into the element's unrotated frame.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{Element, ElementId, Scene};
use crate::geometry::{Point, rotate_about};
use crate::input::ResizeDirection;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeDirection),
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `pt`, checking the selected
/// element's handles first.
#[must_use]
pub fn hit_test(pt: Point, scene: &Scene, selected: Option<&ElementId>) -> Option<Hit> {
    if let Some(element) = selected.and_then(|id| scene.get(id)) {
        if let Some(part) = handle_at(pt, element) {
            return Some(Hit { element_id: element.id.clone(), part });
        }
    }

    scene
        .iter()
        .rev()
        .find(|element| body_contains(pt, element))
        .map(|element| Hit { element_id: element.id.clone(), part: HitPart::Body })
}

/// Canvas-local positions of the four corner handles, after rotation.
#[must_use]
pub fn resize_handle_positions(element: &Element) -> [(ResizeDirection, Point); 4] {
    let Point { x, y } = element.position;
    let w = element.size.width;
    let h = element.size.height;
    let pivot = element.center();
    let corner = |px: f64, py: f64| rotate_about(Point::new(px, py), pivot, element.rotation);
    [
        (ResizeDirection::TopLeft, corner(x, y)),
        (ResizeDirection::TopRight, corner(x + w, y)),
        (ResizeDirection::BottomLeft, corner(x, y + h)),
        (ResizeDirection::BottomRight, corner(x + w, y + h)),
    ]
}

/// Canvas-local position of the rotate handle, above the top edge center.
#[must_use]
pub fn rotate_handle_position(element: &Element) -> Point {
    let top_center = Point::new(
        element.position.x + element.size.width / 2.0,
        element.position.y - ROTATE_HANDLE_OFFSET_PX,
    );
    rotate_about(top_center, element.center(), element.rotation)
}

fn handle_at(pt: Point, element: &Element) -> Option<HitPart> {
    if within_radius(pt, rotate_handle_position(element)) {
        return Some(HitPart::RotateHandle);
    }
    resize_handle_positions(element)
        .into_iter()
        .find(|(_, pos)| within_radius(pt, *pos))
        .map(|(dir, _)| HitPart::ResizeHandle(dir))
}

fn within_radius(pt: Point, target: Point) -> bool {
    (pt.x - target.x).hypot(pt.y - target.y) <= HANDLE_RADIUS_PX
}

fn body_contains(pt: Point, element: &Element) -> bool {
    let local = rotate_about(pt, element.center(), -element.rotation);
    let Point { x, y } = element.position;
    local.x >= x && local.x <= x + element.size.width && local.y >= y && local.y <= y + element.size.height
}
