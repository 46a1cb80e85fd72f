//! Browser bindings: `localStorage` snapshots and the JS-facing editor.
//!
//! The page host wires DOM events to [`WebEditor`] and repaints from
//! [`WebEditor::view_json`] whenever an action list contains `render_needed`.
//! Action lists and views cross the boundary as JSON strings.

use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::doc::ElementId;
use crate::engine::{Action, Editor};
use crate::geometry::{Point, Size};
use crate::input::{Key, PointerTarget};
use crate::store::{SnapshotStore, StoreError};

/// Snapshot store backed by `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable("localStorage disabled".into())),
            Err(e) => Err(StoreError::Unavailable(format!("{e:?}"))),
        }
    }
}

impl SnapshotStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn save(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, payload)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}

/// The editor session as seen from JavaScript.
#[wasm_bindgen]
pub struct WebEditor {
    inner: Editor<LocalStorage>,
}

#[wasm_bindgen]
impl WebEditor {
    /// Open the session, restoring from `localStorage`. `config_json` may be
    /// empty or a partial [`EditorConfig`] object.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(config_json: &str) -> WebEditor {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json)
        };
        WebEditor { inner: Editor::open(config, LocalStorage) }
    }

    /// Report the canvas bounding rect (client coordinates).
    pub fn set_canvas_bounds(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.inner.set_canvas_bounds(Point::new(left, top), Size::new(width, height));
    }

    pub fn create_rectangle(&mut self) -> String {
        to_json(&self.inner.create_rectangle())
    }

    pub fn create_text(&mut self) -> String {
        to_json(&self.inner.create_text())
    }

    pub fn delete(&mut self, id: &str) -> String {
        to_json(&self.inner.delete(&ElementId::from(id)))
    }

    pub fn select(&mut self, id: &str) -> String {
        to_json(&self.inner.select(&ElementId::from(id)))
    }

    pub fn deselect(&mut self) -> String {
        to_json(&self.inner.deselect())
    }

    pub fn raise(&mut self, id: &str) -> String {
        to_json(&self.inner.raise(&ElementId::from(id)))
    }

    pub fn lower(&mut self, id: &str) -> String {
        to_json(&self.inner.lower(&ElementId::from(id)))
    }

    pub fn begin_text_edit(&mut self, id: &str) -> String {
        to_json(&self.inner.begin_text_edit(&ElementId::from(id)))
    }

    pub fn end_text_edit(&mut self) {
        self.inner.end_text_edit();
    }

    pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> String {
        to_json(&self.inner.set_position(&ElementId::from(id), Point::new(x, y)))
    }

    pub fn set_size(&mut self, id: &str, width: f64, height: f64) -> String {
        to_json(&self.inner.set_size(&ElementId::from(id), Size::new(width, height)))
    }

    pub fn set_rotation(&mut self, id: &str, degrees: f64) -> String {
        to_json(&self.inner.set_rotation(&ElementId::from(id), degrees))
    }

    pub fn set_background(&mut self, id: &str, color: &str) -> String {
        to_json(&self.inner.set_background(&ElementId::from(id), color))
    }

    pub fn set_content(&mut self, id: &str, content: &str) -> String {
        to_json(&self.inner.set_content(&ElementId::from(id), content))
    }

    /// Pointer-down with a DOM-resolved target: `"canvas"`, `"body"` (with
    /// `id`), `"rotate"`, or a corner name such as `"top-left"`.
    pub fn pointer_down(&mut self, x: f64, y: f64, target: &str, id: &str) -> String {
        let Some(target) = PointerTarget::from_host(target, id) else {
            warn!(pointer_target = target, "unknown pointer target; ignored");
            return to_json::<Action>(&[]);
        };
        to_json(&self.inner.on_pointer_down(Point::new(x, y), target))
    }

    /// Pointer-down resolved by hit-testing the scene.
    pub fn pointer_down_at(&mut self, x: f64, y: f64) -> String {
        to_json(&self.inner.on_pointer_down_at(Point::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        to_json(&self.inner.on_pointer_move(Point::new(x, y)))
    }

    pub fn pointer_up(&mut self) -> String {
        to_json(&self.inner.on_pointer_up())
    }

    pub fn key_down(&mut self, key: &str) -> String {
        to_json(&self.inner.on_key_down(&Key(key.to_owned())))
    }

    /// Flush on `beforeunload`.
    pub fn unload(&mut self) -> bool {
        self.inner.unload()
    }

    pub fn view_json(&self) -> String {
        to_json(&self.inner.core().view())
    }

    pub fn layers_json(&self) -> String {
        to_json(&self.inner.core().layers())
    }

    /// `design.json` content, or `"[]"` if encoding fails.
    pub fn export_data(&self) -> String {
        match self.inner.core().export_data() {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "data export failed");
                "[]".to_owned()
            }
        }
    }

    /// `design.html` content.
    pub fn export_markup(&self) -> String {
        self.inner.core().export_markup()
    }
}

fn to_json<T: Serialize>(value: &[T]) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to encode host payload");
            "[]".to_owned()
        }
    }
}
