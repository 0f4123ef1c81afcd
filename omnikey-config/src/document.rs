//! The persisted configuration document schema.

use crate::keybind::KeyBind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current document schema version.
pub const DOCUMENT_VERSION: i32 = 1;

/// The configuration document persisted to disk.
///
/// Every field carries a serde default so documents written by older
/// versions (or hand-edited files missing fields) still load; unknown ids
/// in the per-setting maps are preserved verbatim, since the owning
/// contributor may register its settings after the document is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default = "default_version")]
    pub version: i32,
    /// Keybind assignments keyed by setting id. Slider increment/decrement
    /// slots use the synthetic ids `<slider_id>.increment` and
    /// `<slider_id>.decrement`.
    #[serde(default)]
    pub keybinds: HashMap<String, KeyBind>,
    /// Per-toggle enablement state
    #[serde(default)]
    pub toggle_enabled: HashMap<String, bool>,
    /// Per-slider step size overrides
    #[serde(default)]
    pub slider_steps: HashMap<String, f64>,
    /// Per-slider keybind enablement state
    #[serde(default)]
    pub slider_enabled: HashMap<String, bool>,
    /// Per-setting notification opt-outs
    #[serde(default)]
    pub notifications_disabled: HashMap<String, bool>,
    /// Global: show toast notifications on setting changes
    #[serde(default = "default_true")]
    pub show_toasts: bool,
    /// Global: show HUD notifications on setting changes
    #[serde(default)]
    pub show_hud: bool,
    /// HUD notification duration in milliseconds
    #[serde(default = "default_hud_duration")]
    pub hud_duration_ms: i32,
}

fn default_version() -> i32 {
    DOCUMENT_VERSION
}

fn default_true() -> bool {
    true
}

fn default_hud_duration() -> i32 {
    2000
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            keybinds: HashMap::new(),
            toggle_enabled: HashMap::new(),
            slider_steps: HashMap::new(),
            slider_enabled: HashMap::new(),
            notifications_disabled: HashMap::new(),
            show_toasts: true,
            show_hud: false,
            hud_duration_ms: 2000,
        }
    }
}
