//! Central registry mapping setting ids to live descriptors.

use crate::slider::SliderSetting;
use crate::toggle::ToggleSetting;
use std::collections::HashMap;

/// The authoritative in-memory map of setting id → live accessor.
///
/// Holds both discovered settings and externally pushed registrations.
/// Re-registering an existing id overwrites it (last write wins).
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    toggles: HashMap<String, ToggleSetting>,
    sliders: HashMap<String, SliderSetting>,
}

impl SettingsRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a toggle setting. An existing setting with the same id is
    /// overwritten; the second registration's accessors take effect.
    pub fn register_toggle(&mut self, setting: ToggleSetting) {
        if self.toggles.contains_key(&setting.id) {
            log::debug!("Overwriting existing toggle setting: {}", setting.id);
        }
        log::debug!("Registered toggle setting: {}", setting.id);
        self.toggles.insert(setting.id.clone(), setting);
    }

    /// Register a slider setting, overwriting any existing id.
    pub fn register_slider(&mut self, setting: SliderSetting) {
        if self.sliders.contains_key(&setting.id) {
            log::debug!("Overwriting existing slider setting: {}", setting.id);
        }
        log::debug!("Registered slider setting: {}", setting.id);
        self.sliders.insert(setting.id.clone(), setting);
    }

    /// Remove a toggle setting. Returns whether anything was removed.
    pub fn unregister(&mut self, setting_id: &str) -> bool {
        self.toggles.remove(setting_id).is_some()
    }

    pub fn toggle(&self, setting_id: &str) -> Option<&ToggleSetting> {
        self.toggles.get(setting_id)
    }

    pub fn slider(&self, setting_id: &str) -> Option<&SliderSetting> {
        self.sliders.get(setting_id)
    }

    pub fn toggles(&self) -> Vec<&ToggleSetting> {
        self.toggles.values().collect()
    }

    pub fn sliders(&self) -> Vec<&SliderSetting> {
        self.sliders.values().collect()
    }

    pub fn toggles_in_category(&self, category: &str) -> Vec<&ToggleSetting> {
        self.toggles
            .values()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Distinct toggle categories, sorted for display.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.toggles.values().map(|s| s.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Case-insensitive search over id, display name, category, and
    /// description. A blank query returns every toggle; an unmatched query
    /// returns an empty list.
    pub fn search(&self, query: &str) -> Vec<&ToggleSetting> {
        if query.trim().is_empty() {
            return self.toggles();
        }
        let query = query.to_lowercase();
        self.toggles
            .values()
            .filter(|s| {
                s.id.to_lowercase().contains(&query)
                    || s.display_name.to_lowercase().contains(&query)
                    || s.category.to_lowercase().contains(&query)
                    || s.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn toggle_count(&self) -> usize {
        self.toggles.len()
    }

    pub fn slider_count(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty() && self.sliders.is_empty()
    }
}
