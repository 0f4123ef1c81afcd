//! Settings model for omnikey.
//!
//! This crate defines the uniform setting descriptors (boolean toggles and
//! bounded numeric sliders), the central registry mapping setting ids to
//! live accessors, the external registration API other contributors use to
//! expose their own settings, and the capability-discovery pass that
//! converts a host's option surface into setting descriptors.
//!
//! Covers:
//! - [`ToggleSetting`] / [`SliderSetting`] — descriptors with fallible
//!   getter/setter closures
//! - [`SettingsRegistry`] — id → descriptor maps with query/search APIs
//! - [`SettingsApi`] / [`ToggleBuilder`] — external registration with a
//!   pending queue flushed when the registration hook is installed
//! - [`discovery`] — `OptionSurface` contract and toggle/slider extraction

pub mod api;
pub mod discovery;
mod registry;
mod slider;
mod toggle;

pub use api::{BuildError, SettingsApi, ToggleBuilder};
pub use discovery::{
    OptionCell, OptionHandle, OptionRange, OptionSurface, discover_sliders, discover_toggles,
};
pub use registry::SettingsRegistry;
pub use slider::{FloatGetter, FloatSetter, SliderSetting};
pub use toggle::{BoolGetter, BoolSetter, ToggleSetting};
