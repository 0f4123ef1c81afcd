//! Keybind dispatch engine for omnikey.
//!
//! Consumes raw key-down/key-up/key-repeat events plus the current
//! modifier mask, resolves them against persisted bindings, and invokes
//! the matching setting mutation: single-shot toggles on press, repeatable
//! slider increment/decrement on press and repeat.

mod dispatcher;
mod notifier;

pub use dispatcher::{KeyAction, KeybindDispatcher, is_modifier_key};
pub use notifier::{Notifier, NullNotifier};
