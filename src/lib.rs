//! Interactive element transform engine for an in-browser design surface.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! element model (rectangles and text boxes on a fixed-size canvas), the
//! pointer gesture state machine for move, resize, and rotate, keyboard
//! shortcuts, z-order, and the persisted snapshot. The host JavaScript layer
//! only forwards DOM events to [`web::WebEditor`] and repaints from the
//! resulting [`engine::Action`]s. The same core is driven natively by the
//! `design-cli` crate for exports.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state, gesture math, and the persisting [`engine::Editor`] |
//! | [`doc`] | Element types and the z-ordered [`doc::Scene`] |
//! | [`geometry`] | Points, sizes, clamping, and rotation helpers |
//! | [`input`] | Pointer targets, keys, and the gesture state machine |
//! | [`hit`] | Hit-testing bodies and handles of rotated elements |
//! | [`render`] | View model consumed by the host when repainting |
//! | [`codec`] | Storage snapshot, restore, and JSON/HTML exports |
//! | [`store`] | Snapshot persistence trait and an in-memory store |
//! | [`config`] | Editor configuration and defaults |
//! | [`web`] | `wasm-bindgen` surface and `localStorage` store |
//! | [`consts`] | Shared constants (minimum sizes, handle radii, etc.) |

pub mod codec;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod store;
pub mod web;
