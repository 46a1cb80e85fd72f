//! Pure geometry: points, sizes, render transforms, and canvas clamping.
//!
//! Everything here is stateless. Positions are canvas-local and unrotated:
//! `(x, y)` is the top-left of the element's box before rotation is applied.
//! Rotation always pivots on the box center.
//!
//! Pointer deltas are applied in screen axes. There is deliberately no
//! inverse-rotation step, so dragging or resizing a rotated element moves its
//! unrotated box along the screen's x/y axes.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

/// A point in either client (page) or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    /// The point with every non-finite component replaced by 0.
    #[must_use]
    pub fn finite(self) -> Point {
        Point::new(finite_or_zero(self.x), finite_or_zero(self.y))
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The size with every non-finite dimension replaced by 0.
    #[must_use]
    pub fn finite(self) -> Size {
        Size::new(finite_or_zero(self.width), finite_or_zero(self.height))
    }

    /// Floor each dimension at the given minimums.
    #[must_use]
    pub fn floored(self, min_width: f64, min_height: f64) -> Size {
        Size::new(self.width.max(min_width), self.height.max(min_height))
    }
}

/// The render transform of an element: translate to `position`, then rotate
/// about the element's own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub rotation_deg: f64,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg)",
            self.translate.x, self.translate.y, self.rotation_deg
        )
    }
}

/// `value`, or 0 when it is NaN or infinite.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Build the render transform for an element at `position` rotated by
/// `rotation_deg`. The rotation origin is the box center, so the host must
/// pair this with `transform-origin: center`.
#[must_use]
pub fn render_transform(position: Point, rotation_deg: f64) -> Transform {
    Transform { translate: position, rotation_deg }
}

/// Clamp `position` so a box of `size` stays inside `container`.
///
/// When the container is smaller than the box on some axis the bounds invert;
/// the lower bound wins and that axis collapses to 0.
#[must_use]
pub fn clamp_position(position: Point, size: Size, container: Size) -> Point {
    Point::new(
        clamp_axis(position.x, container.width - size.width),
        clamp_axis(position.y, container.height - size.height),
    )
}

fn clamp_axis(value: f64, upper: f64) -> f64 {
    value.min(upper).max(0.0)
}

/// Center of the unrotated box at `position` with `size`.
#[must_use]
pub fn center(position: Point, size: Size) -> Point {
    Point::new(position.x + size.width / 2.0, position.y + size.height / 2.0)
}

/// Angle in radians of `pointer` around `pivot`, as `atan2(dy, dx)`.
#[must_use]
pub fn angle_around(pivot: Point, pointer: Point) -> f64 {
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x)
}

/// Rotate `pt` about `pivot` by `degrees` (clockwise in screen space, y down).
#[must_use]
pub fn rotate_about(pt: Point, pivot: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = pt.x - pivot.x;
    let dy = pt.y - pivot.y;
    Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}
