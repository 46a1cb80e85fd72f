//! Input model: pointer targets, keys, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Being a single enum, at most one of dragging, resizing, and
//! rotating can be active at any instant; entering one replaces whichever was
//! active. Each active variant carries the pre-gesture snapshot needed to
//! compute geometry from the current pointer alone, so moves never drift and
//! replaying the same move is idempotent.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementId;
use crate::geometry::{Point, Size};

/// Corner a resize handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    /// Parse a host handle name such as `"top-left"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Host handle name, the inverse of [`ResizeDirection::from_name`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// What a pointer-down landed on, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas area.
    Canvas,
    /// The body of an element (not one of its handles).
    Body(ElementId),
    /// A corner handle of the selected element.
    ResizeHandle(ResizeDirection),
    /// The rotate handle of the selected element.
    RotateHandle,
}

impl PointerTarget {
    /// Parse a DOM host's target name: `"canvas"`, `"body"` (with the
    /// element `id`), `"rotate"`, or a corner name such as `"top-left"`.
    #[must_use]
    pub fn from_host(target: &str, id: &str) -> Option<Self> {
        match target {
            "canvas" => Some(Self::Canvas),
            "body" if !id.is_empty() => Some(Self::Body(ElementId::from(id))),
            "rotate" => Some(Self::RotateHandle),
            other => ResizeDirection::from_name(other).map(Self::ResizeHandle),
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"ArrowLeft"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Unit step for arrow keys, `None` for anything else.
    #[must_use]
    pub fn arrow_direction(&self) -> Option<(f64, f64)> {
        match self.0.as_str() {
            "ArrowLeft" => Some((-1.0, 0.0)),
            "ArrowRight" => Some((1.0, 0.0)),
            "ArrowUp" => Some((0.0, -1.0)),
            "ArrowDown" => Some((0.0, 1.0)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }
}

/// The externally visible interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Dragging,
    Resizing(ResizeDirection),
    Rotating,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving the selected element.
    Dragging {
        id: ElementId,
        /// Pointer minus element top-left (client space) at gesture start.
        offset: Point,
    },
    /// Resizing the selected element from one corner.
    Resizing {
        id: ElementId,
        direction: ResizeDirection,
        /// Pointer position at gesture start, client space.
        start_pointer: Point,
        start_position: Point,
        start_size: Size,
    },
    /// Rotating the selected element about its center.
    Rotating {
        id: ElementId,
        /// Client-space box center, fixed for the whole gesture.
        center: Point,
        /// Pointer angle around `center` at gesture start, radians.
        start_angle: f64,
        /// Element rotation at gesture start, degrees.
        start_rotation: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Dragging { .. } => InteractionMode::Dragging,
            Self::Resizing { direction, .. } => InteractionMode::Resizing(*direction),
            Self::Rotating { .. } => InteractionMode::Rotating,
        }
    }

    /// The element this gesture manipulates, if one is active.
    #[must_use]
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => Some(id),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
