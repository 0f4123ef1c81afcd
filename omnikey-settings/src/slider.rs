//! Bounded numeric slider setting descriptor.

use anyhow::Result;
use std::fmt;

/// Fallible getter for a slider's current value, as a uniform f64.
pub type FloatGetter = Box<dyn Fn() -> Result<f64>>;
/// Fallible setter for a slider's value. Callers clamp before invoking.
pub type FloatSetter = Box<dyn Fn(f64) -> Result<()>>;

/// A named, host-owned bounded numeric value controllable through the
/// engine via increment/decrement keybinds.
///
/// Invariant: `min <= max`; `set_value` clamps to `[min, max]`. The
/// effective step used at runtime is resolved by the caller from persisted
/// config, falling back to `default_step`.
pub struct SliderSetting {
    pub id: String,
    pub display_name: String,
    pub category: String,
    pub description: String,
    /// Identifies a contributing extension; `None` means the host itself
    pub owner_id: Option<String>,
    pub min: f64,
    pub max: f64,
    pub default_step: f64,
    get: FloatGetter,
    set: FloatSetter,
}

impl SliderSetting {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        min: f64,
        max: f64,
        default_step: f64,
        get: FloatGetter,
        set: FloatSetter,
    ) -> Self {
        debug_assert!(min <= max, "slider min must not exceed max");
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category: category.into(),
            description: String::new(),
            owner_id: None,
            min,
            max,
            default_step,
            get,
            set,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Read the live value from the host.
    pub fn value(&self) -> Result<f64> {
        (self.get)()
    }

    /// Write a new value to the host, clamped to `[min, max]`.
    pub fn set_value(&self, value: f64) -> Result<()> {
        (self.set)(value.clamp(self.min, self.max))
    }

    /// Raise the value by `step`, clamped. Returns the new value.
    pub fn increment(&self, step: f64) -> Result<f64> {
        let new_value = (self.value()? + step).clamp(self.min, self.max);
        self.set_value(new_value)?;
        Ok(new_value)
    }

    /// Lower the value by `step`, clamped. Returns the new value.
    pub fn decrement(&self, step: f64) -> Result<f64> {
        let new_value = (self.value()? - step).clamp(self.min, self.max);
        self.set_value(new_value)?;
        Ok(new_value)
    }

    /// Name of whoever contributed this setting.
    pub fn source_name(&self) -> &str {
        self.owner_id.as_deref().unwrap_or("Host")
    }
}

impl fmt::Debug for SliderSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderSetting")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("default_step", &self.default_step)
            .finish_non_exhaustive()
    }
}
