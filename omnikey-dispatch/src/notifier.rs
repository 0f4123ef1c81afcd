//! Notification collaborator boundary.

use omnikey_settings::{SliderSetting, ToggleSetting};

/// Receives fire-and-forget notifications when a setting changes through a
/// keybind. Presentation layers (toasts, HUD overlays) implement this; the
/// engine consumes no return value.
pub trait Notifier {
    fn notify_toggle(&self, setting: &ToggleSetting, new_value: bool);
    fn notify_slider(&self, setting: &SliderSetting, new_value: f64);
}

/// Notifier that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_toggle(&self, _setting: &ToggleSetting, _new_value: bool) {}
    fn notify_slider(&self, _setting: &SliderSetting, _new_value: f64) {}
}
