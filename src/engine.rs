use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::codec::{self, CodecError};
use crate::config::EditorConfig;
use crate::doc::{Element, ElementId, IdGenerator, Scene};
use crate::geometry::{self, Point, Size, clamp_position};
use crate::hit::{self, HitPart};
use crate::input::{InputState, InteractionMode, Key, PointerTarget, ResizeDirection};
use crate::render::{self, ElementView, LayerEntry};
use crate::store::SnapshotStore;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from editor operations for the host to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Action {
    ElementCreated(ElementId),
    ElementUpdated(ElementId),
    ElementDeleted(ElementId),
    SelectionChanged(Option<ElementId>),
    LayersChanged,
    EditTextRequested(ElementId),
    /// The scene reached a commit boundary and should be persisted.
    SnapshotRequested,
    RenderNeeded,
}

/// Core editor state: all logic that doesn't depend on a host or a store.
///
/// Separated from `Editor` so it can be tested without storage or browser
/// dependencies. Pointer positions are client (page) coordinates; the host
/// reports where the canvas sits via [`EditorCore::set_canvas_bounds`].
pub struct EditorCore {
    scene: Scene,
    config: EditorConfig,
    ids: IdGenerator,
    selected: Option<ElementId>,
    input: InputState,
    editing_text: bool,
    canvas_origin: Point,
    canvas_size: Size,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            canvas_size: config.canvas_size(),
            config,
            ids: IdGenerator::default(),
            selected: None,
            input: InputState::Idle,
            editing_text: false,
            canvas_origin: Point::default(),
        }
    }

    // --- Data inputs ---

    /// Replace the scene with one restored from a storage payload. Clears
    /// selection and any gesture in progress.
    pub fn restore(&mut self, raw: &str) {
        self.scene = codec::restore(raw, &mut self.ids);
        self.selected = None;
        self.input = InputState::Idle;
        self.editing_text = false;
    }

    /// Record where the canvas sits on the page and how large it is.
    pub fn set_canvas_bounds(&mut self, origin: Point, size: Size) {
        self.canvas_origin = origin.finite();
        self.canvas_size = size.finite();
    }

    // --- Creation / deletion ---

    /// Add a rectangle at the canvas origin and select it.
    pub fn create_rectangle(&mut self) -> Vec<Action> {
        let element = Element::rectangle(self.ids.next_id(&self.scene), self.config.rectangle_size());
        self.add(element)
    }

    /// Add an empty text box at the canvas origin and select it.
    pub fn create_text(&mut self) -> Vec<Action> {
        let element = Element::text(self.ids.next_id(&self.scene), self.config.text_size());
        self.add(element)
    }

    fn add(&mut self, element: Element) -> Vec<Action> {
        let id = element.id.clone();
        if !self.scene.push(element) {
            warn!(%id, "element id already in scene; creation ignored");
            return Vec::new();
        }
        debug!(%id, "element created");
        let mut actions = vec![Action::ElementCreated(id.clone())];
        actions.extend(self.select(&id));
        actions.extend([Action::LayersChanged, Action::SnapshotRequested, Action::RenderNeeded]);
        actions
    }

    /// Remove an element. Clears the selection if it pointed at it.
    pub fn delete(&mut self, id: &ElementId) -> Vec<Action> {
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        debug!(%id, "element deleted");
        let mut actions = vec![Action::ElementDeleted(id.clone())];
        if self.selected.as_ref() == Some(id) {
            actions.extend(self.deselect());
        }
        actions.extend([Action::LayersChanged, Action::SnapshotRequested, Action::RenderNeeded]);
        actions
    }

    // --- Selection ---

    /// Select `id`. Any gesture or text edit on the previous selection ends.
    pub fn select(&mut self, id: &ElementId) -> Vec<Action> {
        if self.selected.as_ref() == Some(id) || !self.scene.contains(id) {
            return Vec::new();
        }
        self.end_session();
        self.selected = Some(id.clone());
        vec![Action::SelectionChanged(Some(id.clone())), Action::RenderNeeded]
    }

    /// Clear the selection. No-op when nothing is selected.
    pub fn deselect(&mut self) -> Vec<Action> {
        if self.selected.is_none() {
            return Vec::new();
        }
        self.end_session();
        self.selected = None;
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    fn end_session(&mut self) {
        if self.input.is_active() {
            debug!(mode = ?self.input.mode(), "gesture discarded by selection change");
        }
        self.input = InputState::Idle;
        self.editing_text = false;
    }

    // --- Layering ---

    /// Move `id` one step up the stack.
    pub fn raise(&mut self, id: &ElementId) -> Vec<Action> {
        if self.scene.raise(id) { layers_changed() } else { Vec::new() }
    }

    /// Move `id` one step down the stack.
    pub fn lower(&mut self, id: &ElementId) -> Vec<Action> {
        if self.scene.lower(id) { layers_changed() } else { Vec::new() }
    }

    // --- Text editing ---

    /// Enter text-edit mode on a text element (double-click).
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Vec<Action> {
        if !self.scene.get(id).is_some_and(Element::is_text) {
            return Vec::new();
        }
        let mut actions = self.select(id);
        self.input = InputState::Idle;
        self.editing_text = true;
        actions.push(Action::EditTextRequested(id.clone()));
        actions
    }

    /// Leave text-edit mode (blur).
    pub fn end_text_edit(&mut self) {
        self.editing_text = false;
    }

    // --- Property edits ---
    //
    // Panel values arrive unvalidated; NaN and infinities read as 0.

    /// Set an element's position as typed into the property panel.
    pub fn set_position(&mut self, id: &ElementId, position: Point) -> Vec<Action> {
        let position = position.finite();
        self.edit(id, |e| e.position = position)
    }

    /// Set an element's size; each dimension is floored at its minimum.
    pub fn set_size(&mut self, id: &ElementId, size: Size) -> Vec<Action> {
        let size = size.finite();
        self.edit(id, |e| e.set_size(size))
    }

    pub fn set_rotation(&mut self, id: &ElementId, degrees: f64) -> Vec<Action> {
        let degrees = geometry::finite_or_zero(degrees);
        self.edit(id, |e| e.rotation = degrees)
    }

    /// Set an explicit background color. An empty string restores the default.
    pub fn set_background(&mut self, id: &ElementId, color: &str) -> Vec<Action> {
        let color = color.trim();
        self.edit(id, |e| e.style.background = (!color.is_empty()).then(|| color.to_owned()))
    }

    /// Replace a text element's content. Ignored for rectangles.
    pub fn set_content(&mut self, id: &ElementId, content: &str) -> Vec<Action> {
        if !self.scene.get(id).is_some_and(Element::is_text) {
            return Vec::new();
        }
        let mut actions = self.edit(id, |e| {
            e.set_content(content);
        });
        actions.push(Action::LayersChanged);
        actions
    }

    fn edit(&mut self, id: &ElementId, apply: impl FnOnce(&mut Element)) -> Vec<Action> {
        let Some(element) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        apply(element);
        vec![Action::ElementUpdated(id.clone()), Action::SnapshotRequested, Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Pointer-down at client position `pt` on a host-resolved target.
    pub fn on_pointer_down(&mut self, pt: Point, target: PointerTarget) -> Vec<Action> {
        let pt = pt.finite();
        match target {
            PointerTarget::Canvas => self.deselect(),
            PointerTarget::Body(id) => self.press_body(pt, &id),
            PointerTarget::ResizeHandle(direction) => self.start_resize(pt, direction),
            PointerTarget::RotateHandle => self.start_rotate(pt),
        }
    }

    /// Pointer-down at client position `pt`, resolving the target by hit-testing.
    pub fn on_pointer_down_at(&mut self, pt: Point) -> Vec<Action> {
        let pt = pt.finite();
        let local = pt.sub(self.canvas_origin);
        let target = match hit::hit_test(local, &self.scene, self.selected.as_ref()) {
            None => PointerTarget::Canvas,
            Some(hit) => match hit.part {
                HitPart::Body => PointerTarget::Body(hit.element_id),
                HitPart::ResizeHandle(direction) => PointerTarget::ResizeHandle(direction),
                HitPart::RotateHandle => PointerTarget::RotateHandle,
            },
        };
        self.on_pointer_down(pt, target)
    }

    fn press_body(&mut self, pt: Point, id: &ElementId) -> Vec<Action> {
        let Some(element) = self.scene.get(id) else {
            return Vec::new();
        };
        if element.is_text() && self.editing_text {
            return Vec::new();
        }
        let mut actions = self.select(id);
        actions.extend(self.start_drag(pt));
        actions
    }

    fn start_drag(&mut self, pt: Point) -> Vec<Action> {
        let Some(element) = self.selected_element() else {
            return Vec::new();
        };
        if element.is_text() && self.editing_text {
            return Vec::new();
        }
        let top_left = self.canvas_origin.add(element.position);
        let id = element.id.clone();
        debug!(%id, "drag started");
        self.input = InputState::Dragging { id, offset: pt.sub(top_left) };
        Vec::new()
    }

    fn start_resize(&mut self, pt: Point, direction: ResizeDirection) -> Vec<Action> {
        let Some(element) = self.selected_element() else {
            return Vec::new();
        };
        let (id, start_position, start_size) = (element.id.clone(), element.position, element.size);
        debug!(%id, direction = direction.name(), "resize started");
        self.input = InputState::Resizing { id, direction, start_pointer: pt, start_position, start_size };
        Vec::new()
    }

    fn start_rotate(&mut self, pt: Point) -> Vec<Action> {
        let Some(element) = self.selected_element() else {
            return Vec::new();
        };
        let center = self.canvas_origin.add(element.center());
        let (id, start_rotation) = (element.id.clone(), element.rotation);
        debug!(%id, "rotate started");
        self.input = InputState::Rotating {
            id,
            center,
            start_angle: geometry::angle_around(center, pt),
            start_rotation,
        };
        Vec::new()
    }

    /// Pointer-move at client position `pt`. Idempotent for a given gesture
    /// and pointer position.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let pt = pt.finite();
        let origin = self.canvas_origin;
        let container = self.canvas_size;
        let input = self.input.clone();
        let Some(id) = input.element_id() else {
            return Vec::new();
        };
        let Some(element) = self.scene.get_mut(id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };

        match &input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { offset, .. } => {
                let top_left = pt.sub(origin).sub(*offset);
                element.position = clamp_position(top_left, element.size, container);
            }
            InputState::Resizing { direction, start_pointer, start_position, start_size, .. } => {
                let (position, size) = resize_geometry(*direction, pt.sub(*start_pointer), *start_position, *start_size);
                element.position = position;
                element.set_size(size);
            }
            InputState::Rotating { center, start_angle, start_rotation, .. } => {
                let current = geometry::angle_around(*center, pt);
                element.rotation = start_rotation + (current - start_angle).to_degrees();
            }
        }
        vec![Action::ElementUpdated(id.clone()), Action::RenderNeeded]
    }

    /// Pointer-up ends any active gesture and requests a snapshot.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let previous = std::mem::take(&mut self.input);
        let Some(id) = previous.element_id() else {
            return Vec::new();
        };
        debug!(%id, mode = ?previous.mode(), "gesture ended");
        vec![Action::ElementUpdated(id.clone()), Action::SnapshotRequested, Action::RenderNeeded]
    }

    // --- Keyboard ---

    /// Arrow keys nudge the selection; `Delete` removes it. Suppressed while
    /// editing text.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if self.editing_text {
            return Vec::new();
        }
        let Some(id) = self.selected.clone() else {
            return Vec::new();
        };
        if key.is_delete() {
            return self.delete(&id);
        }
        let Some((ux, uy)) = key.arrow_direction() else {
            return Vec::new();
        };
        let step = self.config.nudge_step;
        let container = self.canvas_size;
        self.edit(&id, |e| {
            let moved = Point::new(e.position.x + ux * step, e.position.y + uy * step);
            e.position = clamp_position(moved, e.size, container);
        })
    }

    // --- Codec ---

    /// The storage payload for the current scene.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, CodecError> {
        codec::to_storage_json(&self.scene)
    }

    /// `design.json` content.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if serialization fails.
    pub fn export_data(&self) -> Result<String, CodecError> {
        codec::export_data(&self.scene, &self.config)
    }

    /// `design.html` content.
    #[must_use]
    pub fn export_markup(&self) -> String {
        codec::export_markup(&self.scene, &self.config)
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.scene.get(id)
    }

    /// The currently selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.scene.get(id))
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.input.mode()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mode() == InteractionMode::Dragging
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self.mode(), InteractionMode::Resizing(_))
    }

    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.mode() == InteractionMode::Rotating
    }

    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        self.editing_text
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Paint-order views of every element.
    #[must_use]
    pub fn view(&self) -> Vec<ElementView> {
        render::scene_view(&self.scene, self.selected.as_ref(), &self.config)
    }

    /// Layer-list rows, top-most first.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerEntry> {
        render::layers(&self.scene, self.selected.as_ref())
    }
}

fn layers_changed() -> Vec<Action> {
    vec![Action::LayersChanged, Action::SnapshotRequested, Action::RenderNeeded]
}

/// New position and size for a corner resize by pointer delta `delta`.
///
/// Left/top handles move the near edge with the pointer while the far edge
/// stays put; once the dimension hits its floor the far edge still stays put,
/// so the element never inverts or slides.
fn resize_geometry(direction: ResizeDirection, delta: Point, start: Point, start_size: Size) -> (Point, Size) {
    use crate::consts::{MIN_HEIGHT, MIN_WIDTH};

    let (width, x) = if direction.is_left() {
        let width = (start_size.width - delta.x).max(MIN_WIDTH);
        (width, start.x + start_size.width - width)
    } else {
        ((start_size.width + delta.x).max(MIN_WIDTH), start.x)
    };
    let (height, y) = if direction.is_top() {
        let height = (start_size.height - delta.y).max(MIN_HEIGHT);
        (height, start.y + start_size.height - height)
    } else {
        ((start_size.height + delta.y).max(MIN_HEIGHT), start.y)
    };
    (Point::new(x, y), Size::new(width, height))
}

/// The editor session: an [`EditorCore`] bound to a snapshot store.
///
/// Restores once on [`Editor::open`] and saves whenever an operation reaches a
/// commit boundary. Pointer-move never saves. Storage failures are logged
/// and otherwise ignored; the in-memory scene stays authoritative.
pub struct Editor<S: SnapshotStore> {
    core: EditorCore,
    store: S,
}

impl<S: SnapshotStore> Editor<S> {
    /// Open a session, restoring whatever `store` holds under the configured key.
    pub fn open(config: EditorConfig, store: S) -> Self {
        let mut core = EditorCore::new(config);
        match store.load(&core.config().storage_key) {
            Ok(Some(raw)) => core.restore(&raw),
            Ok(None) => info!("no stored scene; starting empty"),
            Err(e) => warn!(error = %e, "stored scene unavailable; starting empty"),
        }
        Self { core, store }
    }

    #[must_use]
    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the current scene. Returns whether the write succeeded.
    pub fn save(&mut self) -> bool {
        let payload = match self.core.snapshot_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "failed to encode scene snapshot");
                return false;
            }
        };
        match self.store.save(&self.core.config().storage_key, &payload) {
            Ok(()) => {
                debug!(elements = self.core.scene().len(), "scene saved");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to save scene snapshot");
                false
            }
        }
    }

    /// Page unload: flush the scene one last time.
    pub fn unload(&mut self) -> bool {
        self.save()
    }

    fn commit(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::SnapshotRequested) {
            self.save();
        }
        actions
    }

    // --- Delegated operations ---

    pub fn set_canvas_bounds(&mut self, origin: Point, size: Size) {
        self.core.set_canvas_bounds(origin, size);
    }

    pub fn create_rectangle(&mut self) -> Vec<Action> {
        let actions = self.core.create_rectangle();
        self.commit(actions)
    }

    pub fn create_text(&mut self) -> Vec<Action> {
        let actions = self.core.create_text();
        self.commit(actions)
    }

    pub fn delete(&mut self, id: &ElementId) -> Vec<Action> {
        let actions = self.core.delete(id);
        self.commit(actions)
    }

    pub fn select(&mut self, id: &ElementId) -> Vec<Action> {
        self.core.select(id)
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        self.core.deselect()
    }

    pub fn raise(&mut self, id: &ElementId) -> Vec<Action> {
        let actions = self.core.raise(id);
        self.commit(actions)
    }

    pub fn lower(&mut self, id: &ElementId) -> Vec<Action> {
        let actions = self.core.lower(id);
        self.commit(actions)
    }

    pub fn begin_text_edit(&mut self, id: &ElementId) -> Vec<Action> {
        self.core.begin_text_edit(id)
    }

    pub fn end_text_edit(&mut self) {
        self.core.end_text_edit();
    }

    pub fn set_position(&mut self, id: &ElementId, position: Point) -> Vec<Action> {
        let actions = self.core.set_position(id, position);
        self.commit(actions)
    }

    pub fn set_size(&mut self, id: &ElementId, size: Size) -> Vec<Action> {
        let actions = self.core.set_size(id, size);
        self.commit(actions)
    }

    pub fn set_rotation(&mut self, id: &ElementId, degrees: f64) -> Vec<Action> {
        let actions = self.core.set_rotation(id, degrees);
        self.commit(actions)
    }

    pub fn set_background(&mut self, id: &ElementId, color: &str) -> Vec<Action> {
        let actions = self.core.set_background(id, color);
        self.commit(actions)
    }

    pub fn set_content(&mut self, id: &ElementId, content: &str) -> Vec<Action> {
        let actions = self.core.set_content(id, content);
        self.commit(actions)
    }

    pub fn on_pointer_down(&mut self, pt: Point, target: PointerTarget) -> Vec<Action> {
        self.core.on_pointer_down(pt, target)
    }

    pub fn on_pointer_down_at(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_down_at(pt)
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_up();
        self.commit(actions)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        let actions = self.core.on_key_down(key);
        self.commit(actions)
    }
}
