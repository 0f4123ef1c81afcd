//! Key binding type: a physical key code plus modifier bitmask.

use crate::keycodes;
use serde::{Deserialize, Serialize};

/// A key binding: physical key code plus a bitmask of held modifiers.
///
/// Two bindings are equal iff both the key code and the modifier mask match
/// exactly. An unbound binding carries [`keycodes::KEY_UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBind {
    /// GLFW-compatible key code, or [`keycodes::KEY_UNKNOWN`] when unbound
    pub key_code: i32,
    /// Bitmask of held modifiers (see [`KeyBind::MOD_SHIFT`] etc.)
    pub modifiers: u8,
}

impl Default for KeyBind {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl KeyBind {
    pub const MOD_SHIFT: u8 = 1;
    pub const MOD_CTRL: u8 = 2;
    pub const MOD_ALT: u8 = 4;

    /// The unbound sentinel binding.
    pub const UNBOUND: Self = Self {
        key_code: keycodes::KEY_UNKNOWN,
        modifiers: 0,
    };

    /// Create a binding for a key with a modifier mask.
    pub fn new(key_code: i32, modifiers: u8) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.key_code == keycodes::KEY_UNKNOWN
    }

    pub fn has_shift(&self) -> bool {
        self.modifiers & Self::MOD_SHIFT != 0
    }

    pub fn has_ctrl(&self) -> bool {
        self.modifiers & Self::MOD_CTRL != 0
    }

    pub fn has_alt(&self) -> bool {
        self.modifiers & Self::MOD_ALT != 0
    }

    /// Human-readable form, e.g. "Ctrl + Shift + A" or "Not Bound".
    pub fn to_display_string(&self) -> String {
        if self.is_unbound() {
            return "Not Bound".to_string();
        }

        let mut parts = Vec::new();
        if self.has_ctrl() {
            parts.push("Ctrl".to_string());
        }
        if self.has_alt() {
            parts.push("Alt".to_string());
        }
        if self.has_shift() {
            parts.push("Shift".to_string());
        }
        parts.push(key_name(self.key_code));

        parts.join(" + ")
    }
}

/// Display name for a key code.
///
/// Falls back to "Key <code>" for codes without a friendly name.
pub fn key_name(key_code: i32) -> String {
    match key_code {
        keycodes::KEY_A..=keycodes::KEY_Z => {
            char::from(b'A' + (key_code - keycodes::KEY_A) as u8).to_string()
        }
        keycodes::KEY_0..=keycodes::KEY_9 => {
            char::from(b'0' + (key_code - keycodes::KEY_0) as u8).to_string()
        }
        keycodes::KEY_F1..=keycodes::KEY_F12 => format!("F{}", key_code - keycodes::KEY_F1 + 1),
        keycodes::KEY_KP_0..=keycodes::KEY_KP_9 => {
            format!("Numpad {}", key_code - keycodes::KEY_KP_0)
        }
        keycodes::KEY_SPACE => "Space".to_string(),
        keycodes::KEY_APOSTROPHE => "'".to_string(),
        keycodes::KEY_COMMA => ",".to_string(),
        keycodes::KEY_MINUS => "-".to_string(),
        keycodes::KEY_PERIOD => ".".to_string(),
        keycodes::KEY_SLASH => "/".to_string(),
        keycodes::KEY_SEMICOLON => ";".to_string(),
        keycodes::KEY_EQUAL => "=".to_string(),
        keycodes::KEY_LEFT_BRACKET => "[".to_string(),
        keycodes::KEY_BACKSLASH => "\\".to_string(),
        keycodes::KEY_RIGHT_BRACKET => "]".to_string(),
        keycodes::KEY_GRAVE_ACCENT => "`".to_string(),
        keycodes::KEY_ESCAPE => "Escape".to_string(),
        keycodes::KEY_ENTER => "Enter".to_string(),
        keycodes::KEY_TAB => "Tab".to_string(),
        keycodes::KEY_BACKSPACE => "Backspace".to_string(),
        keycodes::KEY_INSERT => "Insert".to_string(),
        keycodes::KEY_DELETE => "Delete".to_string(),
        keycodes::KEY_RIGHT => "Right".to_string(),
        keycodes::KEY_LEFT => "Left".to_string(),
        keycodes::KEY_DOWN => "Down".to_string(),
        keycodes::KEY_UP => "Up".to_string(),
        keycodes::KEY_PAGE_UP => "Page Up".to_string(),
        keycodes::KEY_PAGE_DOWN => "Page Down".to_string(),
        keycodes::KEY_HOME => "Home".to_string(),
        keycodes::KEY_END => "End".to_string(),
        keycodes::KEY_CAPS_LOCK => "Caps Lock".to_string(),
        keycodes::KEY_SCROLL_LOCK => "Scroll Lock".to_string(),
        keycodes::KEY_NUM_LOCK => "Num Lock".to_string(),
        keycodes::KEY_PRINT_SCREEN => "Print Screen".to_string(),
        keycodes::KEY_PAUSE => "Pause".to_string(),
        keycodes::KEY_KP_DECIMAL => "Numpad .".to_string(),
        keycodes::KEY_KP_DIVIDE => "Numpad /".to_string(),
        keycodes::KEY_KP_MULTIPLY => "Numpad *".to_string(),
        keycodes::KEY_KP_SUBTRACT => "Numpad -".to_string(),
        keycodes::KEY_KP_ADD => "Numpad +".to_string(),
        keycodes::KEY_KP_ENTER => "Numpad Enter".to_string(),
        other => format!("Key {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_sentinel() {
        let bind = KeyBind::default();
        assert!(bind.is_unbound());
        assert_eq!(bind.to_display_string(), "Not Bound");
    }

    #[test]
    fn test_modifier_flags() {
        let bind = KeyBind::new(
            keycodes::KEY_A,
            KeyBind::MOD_CTRL | KeyBind::MOD_SHIFT,
        );
        assert!(bind.has_ctrl());
        assert!(bind.has_shift());
        assert!(!bind.has_alt());
    }

    #[test]
    fn test_display_string_modifier_order() {
        let bind = KeyBind::new(
            keycodes::KEY_A,
            KeyBind::MOD_SHIFT | KeyBind::MOD_CTRL | KeyBind::MOD_ALT,
        );
        assert_eq!(bind.to_display_string(), "Ctrl + Alt + Shift + A");
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(keycodes::KEY_A), "A");
        assert_eq!(key_name(keycodes::KEY_9), "9");
        assert_eq!(key_name(keycodes::KEY_EQUAL), "=");
        assert_eq!(key_name(keycodes::KEY_F1), "F1");
        assert_eq!(key_name(keycodes::KEY_F12), "F12");
        assert_eq!(key_name(keycodes::KEY_KP_0 + 5), "Numpad 5");
        assert_eq!(key_name(9999), "Key 9999");
    }

    #[test]
    fn test_exact_equality() {
        let a = KeyBind::new(keycodes::KEY_A, KeyBind::MOD_CTRL);
        let b = KeyBind::new(keycodes::KEY_A, KeyBind::MOD_CTRL);
        let c = KeyBind::new(keycodes::KEY_A, KeyBind::MOD_CTRL | KeyBind::MOD_SHIFT);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
