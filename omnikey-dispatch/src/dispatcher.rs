//! Input-dispatch state machine.
//!
//! Tracks which physical keys are currently down so one physical press
//! fires a toggle at most once, and resolves every event against the
//! persisted bindings with exact `(key_code, modifiers)` matching.

use crate::notifier::Notifier;
use omnikey_config::{ConfigStore, keycodes};
use omnikey_settings::SettingsRegistry;
use std::collections::HashSet;

/// Raw hardware key event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

/// Dispatch pass restriction. Repeat events run slider-only so holding a
/// toggle key does not retrigger it every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchMode {
    Full,
    SliderOnly,
}

/// Modifier keys never trigger dispatch themselves.
pub fn is_modifier_key(key_code: i32) -> bool {
    matches!(
        key_code,
        keycodes::KEY_LEFT_SHIFT
            | keycodes::KEY_RIGHT_SHIFT
            | keycodes::KEY_LEFT_CONTROL
            | keycodes::KEY_RIGHT_CONTROL
            | keycodes::KEY_LEFT_ALT
            | keycodes::KEY_RIGHT_ALT
            | keycodes::KEY_LEFT_SUPER
            | keycodes::KEY_RIGHT_SUPER
    )
}

/// Turns raw key events into setting mutations.
///
/// Owns only transient debounce state: the set of physically-down key
/// codes, cleared whenever a modal input-capturing surface closes.
#[derive(Debug, Default)]
pub struct KeybindDispatcher {
    pressed: HashSet<i32>,
    modal_active: bool,
}

impl KeybindDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a modal input-capturing surface (e.g. the configuration
    /// screen) open or closed. While open, every event is ignored; closing
    /// clears the debounce state so a key released under the modal does
    /// not leave a stale down entry.
    pub fn set_modal_active(&mut self, active: bool) {
        if self.modal_active && !active {
            log::debug!("Modal surface closed, clearing key states");
            self.pressed.clear();
        }
        self.modal_active = active;
    }

    pub fn modal_active(&self) -> bool {
        self.modal_active
    }

    /// Clear all debounce state.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }

    /// Process a raw hardware key event.
    ///
    /// Returns whether at least one setting changed. Callers may use this
    /// for optional feedback only; other input consumers in the host still
    /// need the raw event, so it must never suppress propagation.
    pub fn handle_key_event(
        &mut self,
        key_code: i32,
        action: KeyAction,
        modifiers: u8,
        registry: &SettingsRegistry,
        config: &ConfigStore,
        notifier: &dyn Notifier,
    ) -> bool {
        if self.modal_active {
            return false;
        }

        if action == KeyAction::Release {
            self.pressed.remove(&key_code);
            return false;
        }

        if is_modifier_key(key_code) {
            return false;
        }

        match action {
            // Holding a key repeats slider adjustments only
            KeyAction::Repeat => {
                // A repeat for a key we never saw go down should not occur
                if !self.pressed.contains(&key_code) {
                    return false;
                }
                self.dispatch(
                    key_code,
                    modifiers,
                    DispatchMode::SliderOnly,
                    registry,
                    config,
                    notifier,
                )
            }
            KeyAction::Press => {
                // Duplicate press without an intervening release: hardware
                // key-repeat can deliver these, debounce them
                if !self.pressed.insert(key_code) {
                    return false;
                }
                self.dispatch(
                    key_code,
                    modifiers,
                    DispatchMode::Full,
                    registry,
                    config,
                    notifier,
                )
            }
            KeyAction::Release => unreachable!("handled above"),
        }
    }

    /// Resolve an event against every persisted binding and fire all
    /// matches. Conflicting bindings are advisory only: every match is
    /// dispatched, and a failed accessor does not stop its siblings.
    fn dispatch(
        &self,
        key_code: i32,
        modifiers: u8,
        mode: DispatchMode,
        registry: &SettingsRegistry,
        config: &ConfigStore,
        notifier: &dyn Notifier,
    ) -> bool {
        if key_code == keycodes::KEY_UNKNOWN {
            return false;
        }

        let mut triggered = false;
        for (setting_id, bind) in config.keybinds() {
            if bind.key_code != key_code || bind.modifiers != modifiers {
                continue;
            }

            if let Some(slider_id) = setting_id.strip_suffix(".increment") {
                triggered |= self.adjust_slider(slider_id, true, registry, config, notifier);
            } else if let Some(slider_id) = setting_id.strip_suffix(".decrement") {
                triggered |= self.adjust_slider(slider_id, false, registry, config, notifier);
            } else if mode == DispatchMode::Full {
                triggered |= self.flip_toggle(setting_id, registry, config, notifier);
            }
        }

        triggered
    }

    fn adjust_slider(
        &self,
        slider_id: &str,
        increase: bool,
        registry: &SettingsRegistry,
        config: &ConfigStore,
        notifier: &dyn Notifier,
    ) -> bool {
        if !config.slider_enabled(slider_id) {
            return false;
        }
        let Some(slider) = registry.slider(slider_id) else {
            return false;
        };

        let step = config.slider_step(slider_id, slider.default_step);
        let result = if increase {
            slider.increment(step)
        } else {
            slider.decrement(step)
        };

        match result {
            Ok(new_value) => {
                log::debug!("Adjusted {} to {new_value}", slider.display_name);
                if !config.notifications_disabled(slider_id) {
                    notifier.notify_slider(slider, new_value);
                }
                true
            }
            Err(e) => {
                log::error!("Failed to adjust slider {}: {e}", slider.id);
                false
            }
        }
    }

    fn flip_toggle(
        &self,
        setting_id: &str,
        registry: &SettingsRegistry,
        config: &ConfigStore,
        notifier: &dyn Notifier,
    ) -> bool {
        let Some(setting) = registry.toggle(setting_id) else {
            return false;
        };

        match setting.toggle() {
            Ok(new_value) => {
                log::debug!("Toggled {} to {new_value}", setting.display_name);
                if !config.notifications_disabled(setting_id) {
                    notifier.notify_toggle(setting, new_value);
                }
                true
            }
            Err(e) => {
                log::error!("Failed to toggle setting {}: {e}", setting.id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NullNotifier;
    use omnikey_config::KeyBind;
    use omnikey_settings::{SliderSetting, ToggleSetting};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingNotifier {
        toggles: RefCell<Vec<(String, bool)>>,
        sliders: RefCell<Vec<(String, f64)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_toggle(&self, setting: &ToggleSetting, new_value: bool) {
            self.toggles.borrow_mut().push((setting.id.clone(), new_value));
        }
        fn notify_slider(&self, setting: &SliderSetting, new_value: f64) {
            self.sliders.borrow_mut().push((setting.id.clone(), new_value));
        }
    }

    fn cell_toggle(id: &str, initial: bool) -> (ToggleSetting, Rc<Cell<bool>>) {
        let value = Rc::new(Cell::new(initial));
        let get_cell = Rc::clone(&value);
        let set_cell = Rc::clone(&value);
        let setting = ToggleSetting::new(
            id,
            id,
            "General",
            Box::new(move || Ok(get_cell.get())),
            Box::new(move |v| {
                set_cell.set(v);
                Ok(())
            }),
        );
        (setting, value)
    }

    fn cell_slider(id: &str, min: f64, max: f64, step: f64, initial: f64) -> (SliderSetting, Rc<Cell<f64>>) {
        let value = Rc::new(Cell::new(initial));
        let get_cell = Rc::clone(&value);
        let set_cell = Rc::clone(&value);
        let setting = SliderSetting::new(
            id,
            id,
            "General",
            min,
            max,
            step,
            Box::new(move || Ok(get_cell.get())),
            Box::new(move |v| {
                set_cell.set(v);
                Ok(())
            }),
        );
        (setting, value)
    }

    fn store_in(dir: &TempDir) -> ConfigStore {
        let mut store = ConfigStore::new(dir.path().join("omnikey.json"));
        store.load();
        store
    }

    #[test]
    fn test_press_release_press_cycle() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = RecordingNotifier::default();
        let mut dispatcher = KeybindDispatcher::new();

        let (setting, value) = cell_toggle("host.fooBar", true);
        registry.register_toggle(setting);
        config.set_keybind("host.fooBar", KeyBind::new(65, 0));

        // Press flips true -> false
        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(!value.get());

        // Duplicate press without a release is ignored
        assert!(!dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(!value.get());

        // Release never dispatches
        assert!(!dispatcher.handle_key_event(65, KeyAction::Release, 0, &registry, &config, &notifier));

        // New press flips again
        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(value.get());

        assert_eq!(
            *notifier.toggles.borrow(),
            vec![("host.fooBar".to_string(), false), ("host.fooBar".to_string(), true)]
        );
    }

    #[test]
    fn test_exact_modifier_match_only() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (setting, value) = cell_toggle("host.fooBar", false);
        registry.register_toggle(setting);
        config.set_keybind("host.fooBar", KeyBind::new(65, KeyBind::MOD_CTRL));

        // Plain A: no match
        assert!(!dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        dispatcher.reset();
        // Ctrl+Shift+A: superset does not match
        assert!(!dispatcher.handle_key_event(
            65,
            KeyAction::Press,
            KeyBind::MOD_CTRL | KeyBind::MOD_SHIFT,
            &registry,
            &config,
            &notifier
        ));
        dispatcher.reset();
        // Ctrl+A: exact match fires
        assert!(dispatcher.handle_key_event(
            65,
            KeyAction::Press,
            KeyBind::MOD_CTRL,
            &registry,
            &config,
            &notifier
        ));
        assert!(value.get());
    }

    #[test]
    fn test_repeat_is_slider_only() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (toggle, toggle_value) = cell_toggle("host.fooBar", false);
        let (slider, slider_value) = cell_slider("host.volume", 0.0, 10.0, 1.0, 5.0);
        registry.register_toggle(toggle);
        registry.register_slider(slider);

        config.set_keybind("host.fooBar", KeyBind::new(65, 0));
        config.set_keybind("host.volume.increment", KeyBind::new(65, 0));
        config.set_slider_enabled("host.volume", true);

        // A repeat for a key never seen going down is ignored
        assert!(!dispatcher.handle_key_event(65, KeyAction::Repeat, 0, &registry, &config, &notifier));

        // Press (full mode) fires both toggle and slider
        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(toggle_value.get());
        assert_eq!(slider_value.get(), 6.0);

        // Repeat while held adjusts the slider but leaves the toggle alone
        assert!(dispatcher.handle_key_event(65, KeyAction::Repeat, 0, &registry, &config, &notifier));
        assert!(toggle_value.get());
        assert_eq!(slider_value.get(), 7.0);
    }

    #[test]
    fn test_hold_to_repeat_clamps_at_max() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (slider, value) = cell_slider("host.volume", 0.0, 10.0, 1.0, 5.0);
        registry.register_slider(slider);
        config.set_keybind("host.volume.increment", KeyBind::new(61, 0));
        config.set_slider_enabled("host.volume", true);

        dispatcher.handle_key_event(61, KeyAction::Press, 0, &registry, &config, &notifier);
        for _ in 0..4 {
            dispatcher.handle_key_event(61, KeyAction::Repeat, 0, &registry, &config, &notifier);
        }
        assert_eq!(value.get(), 10.0);

        // Clamped at max on further repeats
        dispatcher.handle_key_event(61, KeyAction::Repeat, 0, &registry, &config, &notifier);
        assert_eq!(value.get(), 10.0);
    }

    #[test]
    fn test_disabled_slider_skipped() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (slider, value) = cell_slider("host.volume", 0.0, 10.0, 1.0, 5.0);
        registry.register_slider(slider);
        config.set_keybind("host.volume.increment", KeyBind::new(61, 0));
        // slider_enabled defaults to off

        assert!(!dispatcher.handle_key_event(61, KeyAction::Press, 0, &registry, &config, &notifier));
        assert_eq!(value.get(), 5.0);
    }

    #[test]
    fn test_persisted_step_overrides_default() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (slider, value) = cell_slider("host.volume", 0.0, 10.0, 1.0, 5.0);
        registry.register_slider(slider);
        config.set_keybind("host.volume.decrement", KeyBind::new(61, 0));
        config.set_slider_enabled("host.volume", true);
        config.set_slider_step("host.volume", 2.5);

        dispatcher.handle_key_event(61, KeyAction::Press, 0, &registry, &config, &notifier);
        assert_eq!(value.get(), 2.5);
    }

    #[test]
    fn test_modifier_keys_never_dispatch() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (setting, value) = cell_toggle("host.fooBar", false);
        registry.register_toggle(setting);
        config.set_keybind("host.fooBar", KeyBind::new(keycodes::KEY_LEFT_SHIFT, 0));

        assert!(!dispatcher.handle_key_event(
            keycodes::KEY_LEFT_SHIFT,
            KeyAction::Press,
            0,
            &registry,
            &config,
            &notifier
        ));
        assert!(!value.get());
    }

    #[test]
    fn test_modal_surface_blocks_and_clears() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let (setting, value) = cell_toggle("host.fooBar", false);
        registry.register_toggle(setting);
        config.set_keybind("host.fooBar", KeyBind::new(65, 0));

        // Key goes down, then a modal opens before the release arrives
        dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier);
        assert!(value.get());

        dispatcher.set_modal_active(true);
        assert!(!dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(value.get());

        // Closing the modal clears the stale down entry, so the next press fires
        dispatcher.set_modal_active(false);
        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(!value.get());
    }

    #[test]
    fn test_all_conflicting_matches_fire() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = RecordingNotifier::default();
        let mut dispatcher = KeybindDispatcher::new();

        let (a, a_value) = cell_toggle("host.a", false);
        let (b, b_value) = cell_toggle("host.b", false);
        registry.register_toggle(a);
        registry.register_toggle(b);
        config.set_keybind("host.a", KeyBind::new(65, 0));
        config.set_keybind("host.b", KeyBind::new(65, 0));

        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(a_value.get());
        assert!(b_value.get());
        assert_eq!(notifier.toggles.borrow().len(), 2);
    }

    #[test]
    fn test_failing_accessor_does_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        let broken = ToggleSetting::new(
            "host.broken",
            "Broken",
            "General",
            Box::new(|| anyhow::bail!("backing store gone")),
            Box::new(|_| Ok(())),
        );
        let (healthy, value) = cell_toggle("host.healthy", false);
        registry.register_toggle(broken);
        registry.register_toggle(healthy);
        config.set_keybind("host.broken", KeyBind::new(65, 0));
        config.set_keybind("host.healthy", KeyBind::new(65, 0));

        // The failing mutation is logged and skipped, the sibling still fires
        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(value.get());
    }

    #[test]
    fn test_notifications_disabled_suppresses_notifier() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let mut registry = SettingsRegistry::new();
        let notifier = RecordingNotifier::default();
        let mut dispatcher = KeybindDispatcher::new();

        let (setting, value) = cell_toggle("host.fooBar", false);
        registry.register_toggle(setting);
        config.set_keybind("host.fooBar", KeyBind::new(65, 0));
        config.set_notifications_disabled("host.fooBar", true);

        assert!(dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
        assert!(value.get());
        assert!(notifier.toggles.borrow().is_empty());
    }

    #[test]
    fn test_unknown_toggle_id_skipped() {
        let dir = TempDir::new().unwrap();
        let mut config = store_in(&dir);
        let registry = SettingsRegistry::new();
        let notifier = NullNotifier;
        let mut dispatcher = KeybindDispatcher::new();

        config.set_keybind("host.gone", KeyBind::new(65, 0));
        assert!(!dispatcher.handle_key_event(65, KeyAction::Press, 0, &registry, &config, &notifier));
    }
}
