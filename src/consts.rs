//! Shared numeric constants for the design surface.

// ── Geometry floors ─────────────────────────────────────────────

/// Smallest width any element may have, in canvas pixels.
pub const MIN_WIDTH: f64 = 40.0;

/// Smallest height any element may have, in canvas pixels.
pub const MIN_HEIGHT: f64 = 30.0;

// ── Keyboard ────────────────────────────────────────────────────

/// Distance an arrow key moves the selected element.
pub const NUDGE_STEP: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Distance from the top edge to the rotate handle, in pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Persistence ─────────────────────────────────────────────────

/// Storage key the scene snapshot is written under.
pub const STORAGE_KEY: &str = "canvasElements";

/// Prefix for generated element ids (`elem-1`, `elem-2`, ...).
pub const ID_PREFIX: &str = "elem-";
