//! Configuration system for omnikey.
//!
//! This crate owns the persisted configuration document (keybind
//! assignments, per-setting enablement flags, slider step sizes, and
//! notification preferences) and the write-through [`ConfigStore`] that
//! keeps the on-disk JSON file in sync with every mutation.
//!
//! Covers:
//! - [`KeyBind`] — a key code plus modifier bitmask, with display formatting
//! - [`keycodes`] — GLFW-compatible key code constants
//! - [`ConfigDocument`] — the serialized document schema
//! - [`ConfigStore`] — load/save and typed write-through accessors

pub mod document;
pub mod keybind;
pub mod keycodes;
mod store;

pub use document::ConfigDocument;
pub use keybind::KeyBind;
pub use store::ConfigStore;
