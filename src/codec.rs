//! Persistence and export codec.
//!
//! DESIGN
//! ======
//! The scene is stored as a JSON array of flat records, one per element, in
//! z-order (bottom-most first):
//!
//! ```json
//! {"id": "elem-1", "type": "rectangle", "x": 0, "y": 0, "width": 150,
//!  "height": 100, "rotation": 0, "styles": {"backgroundColor": ""}}
//! ```
//!
//! Text boxes add `"content"`. The storage snapshot records the explicit
//! background (empty string when unset); the data export records the
//! effective render color instead. The markup export relies on document
//! order alone for stacking and emits no `z-index`.
//!
//! ERROR HANDLING
//! ==============
//! Restore never fails. An unparsable payload is an empty scene, a record
//! with an unknown or missing `type` is dropped, and a missing or non-numeric
//! geometry field reads as 0 (then floored to the minimum size).

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::doc::{Element, ElementId, ElementKind, IdGenerator, Scene, Style};
use crate::geometry::{self, Point, Size};
use crate::render;

/// Error returned when a snapshot cannot be serialized.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage/export type tag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Rectangle,
    Textbox,
}

/// Style block of a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordStyles {
    #[serde(rename = "backgroundColor", default)]
    pub background_color: String,
}

/// One element as written to storage or to the data export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub styles: RecordStyles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StoredRecord {
    fn from_element(element: &Element, background_color: String) -> Self {
        Self {
            id: element.id.to_string(),
            kind: match element.kind {
                ElementKind::Rectangle => RecordType::Rectangle,
                ElementKind::Text { .. } => RecordType::Textbox,
            },
            x: element.position.x,
            y: element.position.y,
            width: element.size.width,
            height: element.size.height,
            rotation: element.rotation,
            styles: RecordStyles { background_color },
            content: element.content().map(str::to_owned),
        }
    }
}

/// Storage records for `scene`, in z-order.
#[must_use]
pub fn snapshot(scene: &Scene) -> Vec<StoredRecord> {
    scene
        .iter()
        .map(|e| StoredRecord::from_element(e, e.style.background.clone().unwrap_or_default()))
        .collect()
}

/// Serialize `scene` to the storage payload.
///
/// # Errors
///
/// Returns [`CodecError::Serialize`] if JSON encoding fails.
pub fn to_storage_json(scene: &Scene) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&snapshot(scene))?)
}

/// Serialize `scene` for the `design.json` export, recording each element's
/// effective render color.
///
/// # Errors
///
/// Returns [`CodecError::Serialize`] if JSON encoding fails.
pub fn export_data(scene: &Scene, config: &EditorConfig) -> Result<String, CodecError> {
    let records: Vec<StoredRecord> = scene
        .iter()
        .map(|e| StoredRecord::from_element(e, e.effective_background(config).to_owned()))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Rebuild a scene from a storage payload. `ids` is advanced past every
/// restored id and supplies ids for records that lack one.
#[must_use]
pub fn restore(raw: &str, ids: &mut IdGenerator) -> Scene {
    let mut scene = Scene::new();
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("stored scene is not an array; starting empty");
            return scene;
        }
        Err(e) => {
            warn!(error = %e, "stored scene is unparsable; starting empty");
            return scene;
        }
    };

    // Observe every stored id first so generated ids never collide with a
    // later record.
    for raw in items.iter().filter_map(|item| item.get("id").and_then(Value::as_str)) {
        ids.observe(&ElementId::from(raw));
    }

    let mut skipped = 0usize;
    for item in &items {
        let Some(element) = record_to_element(item, ids, &scene) else {
            skipped += 1;
            continue;
        };
        let id = element.id.clone();
        if !scene.push(element) {
            warn!(%id, "duplicate element id in stored scene; dropped");
            skipped += 1;
        }
    }
    scene.reassign_z();
    info!(restored = scene.len(), skipped, "scene restored");
    scene
}

fn record_to_element(item: &Value, ids: &mut IdGenerator, scene: &Scene) -> Option<Element> {
    let kind = match item.get("type").and_then(Value::as_str) {
        Some("rectangle") => ElementKind::Rectangle,
        Some("textbox") => ElementKind::Text {
            content: item
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        },
        other => {
            warn!(kind = ?other, "unknown element type in stored scene; skipped");
            return None;
        }
    };

    let id = match item.get("id").and_then(Value::as_str) {
        Some(raw) if !raw.is_empty() => ElementId::from(raw),
        _ => ids.next_id(scene),
    };

    let background = item
        .get("styles")
        .and_then(|s| s.get("backgroundColor"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_owned);

    let mut element = Element {
        id,
        kind,
        position: Point::new(number(item, "x"), number(item, "y")),
        size: Size::default(),
        rotation: number(item, "rotation"),
        style: Style { background },
        z_index: 0,
    };
    element.set_size(Size::new(number(item, "width"), number(item, "height")));
    Some(element)
}

/// Read a numeric field leniently: numbers and numeric strings parse, and
/// anything else (missing, non-numeric, non-finite) reads as 0.
fn number(item: &Value, key: &str) -> f64 {
    let parsed = match item.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    geometry::finite_or_zero(parsed)
}

/// Render `scene` as a standalone `design.html` document.
#[must_use]
pub fn export_markup(scene: &Scene, config: &EditorConfig) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Design</title>\n</head>\n<body style=\"margin: 0;\">\n");
    push_line(
        &mut html,
        format_args!(
            "<div style=\"position: relative; width: {}px; height: {}px;\">",
            config.canvas_width, config.canvas_height
        ),
    );

    for element in scene.iter() {
        let style = escape_html(&render::inline_style(element, config));
        match element.content() {
            Some(text) => push_line(
                &mut html,
                format_args!(
                    "  <div id=\"{}\" style=\"{style}\"><div style=\"width: 100%; height: 100%; white-space: pre-wrap; overflow-wrap: break-word;\">{}</div></div>",
                    escape_html(element.id.as_str()),
                    escape_html(text)
                ),
            ),
            None => push_line(
                &mut html,
                format_args!("  <div id=\"{}\" style=\"{style}\"></div>", escape_html(element.id.as_str())),
            ),
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn push_line(out: &mut String, args: std::fmt::Arguments<'_>) {
    if out.write_fmt(args).is_ok() {
        out.push('\n');
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
