//! Config persistence and write-through accessors.
//!
//! Covers:
//! - `load` / `save` (JSON file I/O with atomic write)
//! - XDG-compliant path helpers (`config_path`, `config_dir`)
//! - Typed write-through accessors for every document field
//! - Keybind conflict detection (`find_conflicts`)

use crate::document::ConfigDocument;
use crate::keybind::KeyBind;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the [`ConfigDocument`] and its on-disk representation.
///
/// Every mutator persists before returning (write-through). A failed write
/// is logged and the in-memory document stays authoritative for the rest of
/// the session; the next successful write catches up.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: ConfigDocument,
}

impl ConfigStore {
    /// Create a store backed by the given file path. Does not load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: ConfigDocument::default(),
        }
    }

    /// Create a store at the default per-install path.
    pub fn at_default_path() -> Self {
        Self::new(Self::config_path())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("omnikey.json")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("omnikey")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/omnikey
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("omnikey")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// The file path this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the whole document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Load the document from disk.
    ///
    /// A missing file establishes a default document on disk. An unreadable
    /// or unparseable file falls back to a default document in memory only,
    /// leaving the original file untouched so a one-off read glitch cannot
    /// destroy the user's bindings.
    pub fn load(&mut self) {
        if self.path.exists() {
            match fs::read_to_string(&self.path) {
                Ok(contents) => match serde_json::from_str::<ConfigDocument>(&contents) {
                    Ok(document) => {
                        log::info!(
                            "Loaded configuration from {:?} with {} keybinds",
                            self.path,
                            document.keybinds.len()
                        );
                        self.document = document;
                    }
                    Err(e) => {
                        log::error!(
                            "Failed to parse configuration {:?}, using defaults in memory \
                             (file left untouched): {e}",
                            self.path
                        );
                        self.document = ConfigDocument::default();
                    }
                },
                Err(e) => {
                    log::error!(
                        "Failed to read configuration {:?}, using defaults in memory: {e}",
                        self.path
                    );
                    self.document = ConfigDocument::default();
                }
            }
        } else {
            log::info!(
                "Configuration file not found, creating default at {:?}",
                self.path
            );
            self.document = ConfigDocument::default();
            self.persist();
        }
    }

    /// Save the document to disk.
    pub fn save(&self) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.document)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        log::debug!("Saved configuration to {:?}", self.path);
        Ok(())
    }

    /// Write-through save used by the typed mutators.
    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!(
                "Failed to save configuration {:?} (in-memory state remains authoritative): {e}",
                self.path
            );
        }
    }

    // ------------------------------------------------------------------
    // Keybinds
    // ------------------------------------------------------------------

    pub fn keybind(&self, setting_id: &str) -> Option<KeyBind> {
        self.document.keybinds.get(setting_id).copied()
    }

    pub fn set_keybind(&mut self, setting_id: impl Into<String>, bind: KeyBind) {
        self.document.keybinds.insert(setting_id.into(), bind);
        self.persist();
    }

    pub fn clear_keybind(&mut self, setting_id: &str) {
        self.document.keybinds.remove(setting_id);
        self.persist();
    }

    pub fn keybinds(&self) -> &HashMap<String, KeyBind> {
        &self.document.keybinds
    }

    /// Every bound setting id (other than `excluding_id`) whose binding is
    /// bit-for-bit equal to `bind`. An unbound binding never conflicts.
    pub fn find_conflicts(&self, bind: KeyBind, excluding_id: Option<&str>) -> Vec<String> {
        if bind.is_unbound() {
            return Vec::new();
        }

        self.document
            .keybinds
            .iter()
            .filter(|(id, kb)| Some(id.as_str()) != excluding_id && **kb == bind)
            .map(|(id, _)| id.clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Toggle settings
    // ------------------------------------------------------------------

    pub fn toggle_enabled(&self, setting_id: &str) -> bool {
        self.document
            .toggle_enabled
            .get(setting_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn set_toggle_enabled(&mut self, setting_id: impl Into<String>, enabled: bool) {
        self.document
            .toggle_enabled
            .insert(setting_id.into(), enabled);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Slider settings
    // ------------------------------------------------------------------

    /// Effective step for a slider, falling back to its default step.
    pub fn slider_step(&self, slider_id: &str, default_step: f64) -> f64 {
        self.document
            .slider_steps
            .get(slider_id)
            .copied()
            .unwrap_or(default_step)
    }

    pub fn set_slider_step(&mut self, slider_id: impl Into<String>, step: f64) {
        self.document.slider_steps.insert(slider_id.into(), step);
        self.persist();
    }

    pub fn slider_enabled(&self, slider_id: &str) -> bool {
        self.document
            .slider_enabled
            .get(slider_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn set_slider_enabled(&mut self, slider_id: impl Into<String>, enabled: bool) {
        self.document
            .slider_enabled
            .insert(slider_id.into(), enabled);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn notifications_disabled(&self, setting_id: &str) -> bool {
        self.document
            .notifications_disabled
            .get(setting_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn set_notifications_disabled(&mut self, setting_id: impl Into<String>, disabled: bool) {
        self.document
            .notifications_disabled
            .insert(setting_id.into(), disabled);
        self.persist();
    }

    pub fn show_toasts(&self) -> bool {
        self.document.show_toasts
    }

    pub fn set_show_toasts(&mut self, show: bool) {
        self.document.show_toasts = show;
        self.persist();
    }

    pub fn show_hud(&self) -> bool {
        self.document.show_hud
    }

    pub fn set_show_hud(&mut self, show: bool) {
        self.document.show_hud = show;
        self.persist();
    }

    pub fn hud_duration_ms(&self) -> i32 {
        self.document.hud_duration_ms
    }

    pub fn set_hud_duration_ms(&mut self, duration: i32) {
        self.document.hud_duration_ms = duration;
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("omnikey.json"))
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(!store.path().exists());

        store.load();
        assert!(store.path().exists());
        assert!(store.keybinds().is_empty());
    }

    #[test]
    fn test_write_through_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.load();

        let bind = KeyBind::new(keycodes::KEY_A, KeyBind::MOD_CTRL);
        store.set_keybind("host.fooBar", bind);
        store.set_slider_step("host.volume", 0.25);
        store.set_slider_enabled("host.volume", true);
        store.set_notifications_disabled("host.fooBar", true);
        store.set_show_hud(true);

        // A fresh store at the same path must see every mutation
        let mut reloaded = store_in(&dir);
        reloaded.load();
        assert_eq!(reloaded.keybind("host.fooBar"), Some(bind));
        assert_eq!(reloaded.slider_step("host.volume", 0.1), 0.25);
        assert!(reloaded.slider_enabled("host.volume"));
        assert!(reloaded.notifications_disabled("host.fooBar"));
        assert!(reloaded.show_hud());
    }

    #[test]
    fn test_corrupt_file_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("omnikey.json");
        fs::write(&path, "{not valid json").unwrap();

        let mut store = ConfigStore::new(&path);
        store.load();

        // In-memory defaults, corrupt file preserved on disk
        assert!(store.keybinds().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not valid json");
    }

    #[test]
    fn test_find_conflicts() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.load();

        let bind = KeyBind::new(keycodes::KEY_F1, 0);
        store.set_keybind("a", bind);
        store.set_keybind("b", bind);
        store.set_keybind("c", KeyBind::new(keycodes::KEY_F1, KeyBind::MOD_SHIFT));

        let mut conflicts = store.find_conflicts(bind, Some("a"));
        conflicts.sort();
        assert_eq!(conflicts, vec!["b".to_string()]);

        let mut all = store.find_conflicts(bind, None);
        all.sort();
        assert_eq!(all, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unbound_never_conflicts() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.load();
        store.set_keybind("a", KeyBind::UNBOUND);

        assert!(store.find_conflicts(KeyBind::UNBOUND, None).is_empty());
    }

    #[test]
    fn test_slider_step_fallback() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.load();

        assert_eq!(store.slider_step("host.volume", 0.05), 0.05);
        store.set_slider_step("host.volume", 0.5);
        assert_eq!(store.slider_step("host.volume", 0.05), 0.5);
    }

    #[test]
    fn test_enable_flags_default_off() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.load();

        assert!(!store.toggle_enabled("host.fooBar"));
        assert!(!store.slider_enabled("host.volume"));
        assert!(!store.notifications_disabled("host.fooBar"));
    }
}
