//! External registration API for other contributors.
//!
//! Contributors hand their settings to a [`SettingsApi`] which either
//! delivers them straight to the registry (once the engine has installed
//! its registration hook) or queues them until the hook appears.
//! Registrations submitted before the hook exists are flushed in
//! submission order exactly once when the hook becomes available.

use crate::toggle::{BoolGetter, BoolSetter, ToggleSetting};
use thiserror::Error;

/// Receives settings as they are registered.
pub type RegistrationHook = Box<dyn FnMut(ToggleSetting)>;

/// Entry point for contributors registering their own toggle settings.
#[derive(Default)]
pub struct SettingsApi {
    pending: Vec<ToggleSetting>,
    hook: Option<RegistrationHook>,
}

impl SettingsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a setting. Delivered immediately when the registration hook
    /// is installed, queued otherwise.
    pub fn register_setting(&mut self, setting: ToggleSetting) -> bool {
        match &mut self.hook {
            Some(hook) => hook(setting),
            None => {
                log::debug!(
                    "Queueing registration of '{}' until the engine is ready",
                    setting.id
                );
                self.pending.push(setting);
            }
        }
        true
    }

    /// Register several settings, returning how many were accepted.
    pub fn register_settings(&mut self, settings: Vec<ToggleSetting>) -> usize {
        let mut count = 0;
        for setting in settings {
            if self.register_setting(setting) {
                count += 1;
            }
        }
        count
    }

    /// Remove a queued registration by id. Settings already delivered to
    /// the registry are unregistered there, not here.
    pub fn unregister_setting(&mut self, setting_id: &str) -> bool {
        self.pending.retain(|s| s.id != setting_id);
        true
    }

    /// Install the registration hook, flushing queued registrations in
    /// submission order exactly once.
    pub fn set_registration_hook(&mut self, hook: impl FnMut(ToggleSetting) + 'static) {
        let mut hook: RegistrationHook = Box::new(hook);
        if !self.pending.is_empty() {
            log::info!(
                "Flushing {} pending setting registration(s)",
                self.pending.len()
            );
        }
        for setting in self.pending.drain(..) {
            hook(setting);
        }
        self.hook = Some(hook);
    }

    /// Number of registrations still waiting for the hook.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Error building a toggle setting from a [`ToggleBuilder`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("getter must be set for setting '{0}'")]
    MissingGetter(String),
    #[error("setter must be set for setting '{0}'")]
    MissingSetter(String),
}

/// Builder for externally contributed toggle settings.
///
/// `id`, a getter, and a setter are required; everything else defaults.
pub struct ToggleBuilder {
    id: String,
    display_name: Option<String>,
    category: String,
    description: String,
    owner_id: Option<String>,
    get: Option<BoolGetter>,
    set: Option<BoolSetter>,
}

impl ToggleBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            category: "Misc".to_string(),
            description: String::new(),
            owner_id: None,
            get: None,
            set: None,
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn getter(mut self, get: impl Fn() -> anyhow::Result<bool> + 'static) -> Self {
        self.get = Some(Box::new(get));
        self
    }

    pub fn setter(mut self, set: impl Fn(bool) -> anyhow::Result<()> + 'static) -> Self {
        self.set = Some(Box::new(set));
        self
    }

    pub fn build(self) -> Result<ToggleSetting, BuildError> {
        let get = self.get.ok_or_else(|| BuildError::MissingGetter(self.id.clone()))?;
        let set = self.set.ok_or_else(|| BuildError::MissingSetter(self.id.clone()))?;

        let display_name = self.display_name.unwrap_or_else(|| self.id.clone());
        let mut setting =
            ToggleSetting::new(self.id, display_name, self.category, get, set)
                .with_description(self.description);
        if let Some(owner_id) = self.owner_id {
            setting = setting.with_owner(owner_id);
        }
        Ok(setting)
    }
}
