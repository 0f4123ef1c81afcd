//! Boolean toggle setting descriptor.

use anyhow::Result;
use std::fmt;

/// Fallible getter for a toggle's current value.
pub type BoolGetter = Box<dyn Fn() -> Result<bool>>;
/// Fallible setter for a toggle's value.
pub type BoolSetter = Box<dyn Fn(bool) -> Result<()>>;

/// A named, host-owned boolean value controllable through the engine.
///
/// Identity is `id` (globally unique, stable across runs). The descriptor
/// itself is never serialized; only its bindings are persisted, keyed by id.
pub struct ToggleSetting {
    pub id: String,
    pub display_name: String,
    pub category: String,
    pub description: String,
    /// Identifies a contributing extension; `None` means the host itself
    pub owner_id: Option<String>,
    get: BoolGetter,
    set: BoolSetter,
}

impl ToggleSetting {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        get: BoolGetter,
        set: BoolSetter,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category: category.into(),
            description: String::new(),
            owner_id: None,
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
    pub fn value(&self) -> Result<bool> {
        (self.get)()
    }

    /// Write a new value to the host.
    pub fn set_value(&self, value: bool) -> Result<()> {
        (self.set)(value)
    }

    /// Flip the value, returning the new state.
    pub fn toggle(&self) -> Result<bool> {
        let new_value = !self.value()?;
        self.set_value(new_value)?;
        Ok(new_value)
    }

    /// Name of whoever contributed this setting.
    pub fn source_name(&self) -> &str {
        self.owner_id.as_deref().unwrap_or("Host")
    }
}

impl fmt::Debug for ToggleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleSetting")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .field("owner_id", &self.owner_id)
            .finish_non_exhaustive()
    }
}
