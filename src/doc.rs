//! Document model: elements, their style, and the z-ordered scene.
//!
//! `Element` is the typed record for one placed shape; the render layer reads
//! from it and never writes back. `Scene` owns every element in stacking order
//! (index 0 is bottom-most) and keeps each element's `z_index` equal to its
//! index after every structural mutation. `IdGenerator` hands out the
//! monotonically increasing `elem-N` identifiers.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::consts::{ID_PREFIX, MIN_HEIGHT, MIN_WIDTH};
use crate::geometry::{self, Point, Size, Transform};

/// Unique, stable identifier for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// The kind of an element. Text carries its editable plain-text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Filled rectangle.
    Rectangle,
    /// Text box.
    Text {
        /// Plain text content.
        content: String,
    },
}

impl ElementKind {
    /// Storage/export type tag: `"rectangle"` or `"textbox"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Text { .. } => "textbox",
        }
    }
}

/// Visual style of an element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// Explicit background color. `None` renders with the kind's default.
    pub background: Option<String>,
}

/// One placed shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Stable identifier, unique within the scene.
    pub id: ElementId,
    /// Rectangle or text.
    pub kind: ElementKind,
    /// Top-left of the unrotated box, canvas-local.
    pub position: Point,
    /// Box size, never below the minimums.
    pub size: Size,
    /// Signed rotation in degrees about the box center. Never normalized.
    pub rotation: f64,
    /// Background style.
    pub style: Style,
    /// Dense stacking index, equal to the element's position in the scene.
    pub z_index: usize,
}

impl Element {
    /// A rectangle at the canvas origin with the given size.
    #[must_use]
    pub fn rectangle(id: ElementId, size: Size) -> Self {
        Self::with_kind(id, ElementKind::Rectangle, size)
    }

    /// An empty text box at the canvas origin with the given size.
    #[must_use]
    pub fn text(id: ElementId, size: Size) -> Self {
        Self::with_kind(id, ElementKind::Text { content: String::new() }, size)
    }

    fn with_kind(id: ElementId, kind: ElementKind, size: Size) -> Self {
        Self {
            id,
            kind,
            position: Point::default(),
            size: size.floored(MIN_WIDTH, MIN_HEIGHT),
            rotation: 0.0,
            style: Style::default(),
            z_index: 0,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Text content, or `None` for rectangles.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } => Some(content),
            ElementKind::Rectangle => None,
        }
    }

    /// Replace the text content. Returns false for rectangles.
    pub fn set_content(&mut self, text: &str) -> bool {
        match &mut self.kind {
            ElementKind::Text { content } => {
                text.clone_into(content);
                true
            }
            ElementKind::Rectangle => false,
        }
    }

    /// Set the size, flooring each dimension at its minimum.
    pub fn set_size(&mut self, size: Size) {
        self.size = size.floored(MIN_WIDTH, MIN_HEIGHT);
    }

    /// The color the element actually renders with.
    #[must_use]
    pub fn effective_background<'a>(&'a self, config: &'a EditorConfig) -> &'a str {
        if let Some(color) = self.style.background.as_deref() {
            return color;
        }
        match self.kind {
            ElementKind::Rectangle => &config.rectangle_color,
            ElementKind::Text { .. } => &config.text_color,
        }
    }

    /// Center of the unrotated box.
    #[must_use]
    pub fn center(&self) -> Point {
        geometry::center(self.position, self.size)
    }

    /// The render transform for the current geometry.
    #[must_use]
    pub fn transform(&self) -> Transform {
        geometry::render_transform(self.position, self.rotation)
    }
}

/// Ordered collection of elements; order is z-order, index 0 at the bottom.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the stack. Returns false, leaving the
    /// scene untouched, if an element with the same id already exists.
    pub fn push(&mut self, element: Element) -> bool {
        if self.contains(&element.id) {
            return false;
        }
        self.elements.push(element);
        self.reassign_z();
        true
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        self.reassign_z();
        Some(removed)
    }

    /// Swap the element with the one above it. No-op at the top.
    pub fn raise(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
                self.reassign_z();
                true
            }
            _ => false,
        }
    }

    /// Swap the element with the one below it. No-op at the bottom.
    pub fn lower(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.elements.swap(index, index - 1);
                self.reassign_z();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Elements bottom-most first.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Rewrite every `z_index` as its dense position in the stack.
    pub fn reassign_z(&mut self) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.z_index = index;
        }
    }
}

/// Monotonic `elem-N` id source.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    /// Produce the next id not already used in `scene`. The counter wraps
    /// back to 1 once exhausted, skipping ids that are taken.
    pub fn next_id(&mut self, scene: &Scene) -> ElementId {
        loop {
            self.counter = match self.counter.checked_add(1) {
                Some(next) => next,
                None => {
                    warn!("element id counter exhausted; wrapping");
                    1
                }
            };
            let id = ElementId(format!("{ID_PREFIX}{}", self.counter));
            if !scene.contains(&id) {
                return id;
            }
        }
    }

    /// Advance past an id seen elsewhere (e.g. restored from storage) so
    /// later ids never collide with it.
    /// Ids without an `elem-N` shape are left alone.
    pub fn observe(&mut self, id: &ElementId) {
        let Some(suffix) = id.as_str().strip_prefix(ID_PREFIX) else {
            return;
        };
        match suffix.parse::<u64>() {
            Ok(n) => self.counter = self.counter.max(n),
            Err(e) => debug!(%id, error = %e, "id suffix is not a counter"),
        }
    }
}
