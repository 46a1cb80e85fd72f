//! Editor configuration: canvas bounds, defaults for new elements, storage key.
//!
//! Every field has a default, so hosts can pass a partial JSON object (or
//! nothing at all). A payload that fails to parse falls back to the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{NUDGE_STEP, STORAGE_KEY};
use crate::geometry::Size;

const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
const DEFAULT_RECT_WIDTH: f64 = 150.0;
const DEFAULT_RECT_HEIGHT: f64 = 100.0;
const DEFAULT_TEXT_WIDTH: f64 = 200.0;
const DEFAULT_TEXT_HEIGHT: f64 = 40.0;
const DEFAULT_RECT_COLOR: &str = "#4a90e2";
const DEFAULT_TEXT_COLOR: &str = "transparent";

/// Tuning knobs for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in pixels, used for clamping until the host reports bounds.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Key the scene snapshot is stored under.
    pub storage_key: String,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Size of a freshly created rectangle.
    pub rectangle_width: f64,
    pub rectangle_height: f64,
    /// Size of a freshly created text box.
    pub text_width: f64,
    pub text_height: f64,
    /// Render color of a rectangle with no explicit background.
    pub rectangle_color: String,
    /// Render color of a text box with no explicit background.
    pub text_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            storage_key: STORAGE_KEY.to_owned(),
            nudge_step: NUDGE_STEP,
            rectangle_width: DEFAULT_RECT_WIDTH,
            rectangle_height: DEFAULT_RECT_HEIGHT,
            text_width: DEFAULT_TEXT_WIDTH,
            text_height: DEFAULT_TEXT_HEIGHT,
            rectangle_color: DEFAULT_RECT_COLOR.to_owned(),
            text_color: DEFAULT_TEXT_COLOR.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config. Invalid input yields defaults.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "invalid editor config; using defaults");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    #[must_use]
    pub fn rectangle_size(&self) -> Size {
        Size::new(self.rectangle_width, self.rectangle_height)
    }

    #[must_use]
    pub fn text_size(&self) -> Size {
        Size::new(self.text_width, self.text_height)
    }
}
