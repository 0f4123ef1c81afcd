//! omnikey — settings registry and keybind dispatch engine.
//!
//! Lets a host application expose mutable settings (boolean toggles and
//! bounded numeric sliders) that are not natively bindable to input, and
//! lets the end user assign keyboard shortcuts to toggle or adjust them at
//! runtime, with conflict detection and persisted bindings.
//!
//! The [`OmniKey`] context object wires the pieces together:
//! - [`ConfigStore`] persists bindings, enablement flags, step sizes, and
//!   notification preferences (write-through JSON document)
//! - [`SettingsRegistry`] maps setting ids to live accessors, fed by
//!   capability discovery over the host's [`OptionSurface`] and by the
//!   external [`SettingsApi`]
//! - [`KeybindDispatcher`] turns raw key events into setting mutations
//!
//! All state is local to one running instance; registry mutation,
//! discovery, and dispatch are expected on the host's single UI thread.

pub use omnikey_config::{ConfigDocument, ConfigStore, KeyBind, keycodes};
pub use omnikey_dispatch::{KeyAction, KeybindDispatcher, Notifier, NullNotifier, is_modifier_key};
pub use omnikey_settings::{
    BuildError, OptionCell, OptionHandle, OptionRange, OptionSurface, SettingsApi,
    SettingsRegistry, SliderSetting, ToggleBuilder, ToggleSetting, discover_sliders,
    discover_toggles,
};

use parking_lot::RwLock;
use std::sync::Arc;

/// The engine context: one per running host instance.
///
/// Constructed explicitly at startup and passed by reference to the
/// discovery, dispatch, and presentation collaborators, so tests can build
/// isolated instances without process-wide state.
pub struct OmniKey {
    config: ConfigStore,
    registry: Arc<RwLock<SettingsRegistry>>,
    dispatcher: KeybindDispatcher,
    initialized: bool,
}

impl Default for OmniKey {
    fn default() -> Self {
        Self::new()
    }
}

impl OmniKey {
    /// Create an engine backed by the default per-install config path.
    pub fn new() -> Self {
        Self::with_store(ConfigStore::at_default_path())
    }

    /// Create an engine backed by a specific config store.
    pub fn with_store(config: ConfigStore) -> Self {
        Self {
            config,
            registry: Arc::new(RwLock::new(SettingsRegistry::new())),
            dispatcher: KeybindDispatcher::new(),
            initialized: false,
        }
    }

    /// Load persisted state and install the registration hook on the
    /// external API, flushing any queued registrations.
    ///
    /// Calling this twice is a no-op that only logs a warning; settings
    /// registered in the meantime are left untouched.
    pub fn initialize(&mut self, api: &mut SettingsApi) {
        if self.initialized {
            log::warn!("omnikey engine already initialized!");
            return;
        }

        log::info!("Initializing omnikey settings registry...");
        self.config.load();

        let registry = Arc::clone(&self.registry);
        api.set_registration_hook(move |setting| {
            registry.write().register_toggle(setting);
        });

        self.initialized = true;
        log::info!("Settings registry initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run capability discovery over the host's option surface and
    /// register everything it yields.
    pub fn discover(&self, surface: &dyn OptionSurface) {
        log::info!("Discovering host settings...");

        let toggles = discover_toggles(surface);
        let sliders = discover_sliders(surface);

        let mut registry = self.registry.write();
        for setting in toggles {
            registry.register_toggle(setting);
        }
        for setting in sliders {
            registry.register_slider(setting);
        }

        log::info!(
            "Total settings registered: {} toggles, {} sliders",
            registry.toggle_count(),
            registry.slider_count()
        );
    }

    /// Process a raw hardware key event against the persisted bindings.
    ///
    /// Returns whether at least one setting changed — callers may use this
    /// for feedback but must keep propagating the raw event to other input
    /// consumers.
    pub fn handle_key_event(
        &mut self,
        key_code: i32,
        action: KeyAction,
        modifiers: u8,
        notifier: &dyn Notifier,
    ) -> bool {
        let registry = self.registry.read();
        self.dispatcher
            .handle_key_event(key_code, action, modifiers, &registry, &self.config, notifier)
    }

    /// Mark a modal input-capturing surface open or closed. Closing clears
    /// the dispatcher's debounce state.
    pub fn set_modal_active(&mut self, active: bool) {
        self.dispatcher.set_modal_active(active);
    }

    /// Register a toggle setting directly (bypassing the external API).
    pub fn register_toggle(&self, setting: ToggleSetting) {
        self.registry.write().register_toggle(setting);
    }

    /// Register a slider setting.
    pub fn register_slider(&self, setting: SliderSetting) {
        self.registry.write().register_slider(setting);
    }

    /// Shared handle to the registry, for the presentation collaborator.
    pub fn registry(&self) -> &Arc<RwLock<SettingsRegistry>> {
        &self.registry
    }

    /// Read access to the persisted configuration.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Write access to the persisted configuration (write-through).
    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Advisory conflict check: every other bound setting id sharing this
    /// exact binding. Duplicate bindings are surfaced to the user but never
    /// prevented; dispatch fires all matches.
    pub fn find_conflicts(&self, bind: KeyBind, excluding_id: Option<&str>) -> Vec<String> {
        self.config.find_conflicts(bind, excluding_id)
    }
}
