//! Key chords: a macOS virtual key code plus a device-independent modifier mask.
//!
//! Key codes are the `kVK_*` values from HIToolbox `Events.h`. Each supported
//! key also carries the DOM `KeyboardEvent.code` name, which is what the
//! preferences page reports while recording and what the global-shortcut
//! plugin parses into its `Code` type.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use tauri_plugin_global_shortcut::{Code, Modifiers, Shortcut};

use crate::error::AppError;

/// Modifier bits as reported by `NSEvent.modifierFlags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(u64);

impl ModifierMask {
    pub const CAPS_LOCK: Self = Self(1 << 16);
    pub const SHIFT: Self = Self(1 << 17);
    pub const CONTROL: Self = Self(1 << 18);
    pub const OPTION: Self = Self(1 << 19);
    pub const COMMAND: Self = Self(1 << 20);
    pub const FUNCTION: Self = Self(1 << 23);

    /// `NSEventModifierFlagDeviceIndependentFlagsMask`
    pub const DEVICE_INDEPENDENT: u64 = 0xFFFF_0000;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Keeps only the device-independent bits of a raw flag word.
    pub const fn from_bits_truncate(bits: u64) -> Self {
        Self(bits & Self::DEVICE_INDEPENDENT)
    }

    /// Builds a mask from the four modifier states a DOM keyboard event exposes.
    pub fn from_keys(command: bool, option: bool, control: bool, shift: bool) -> Self {
        let mut mask = Self::empty();
        if command {
            mask = mask | Self::COMMAND;
        }
        if option {
            mask = mask | Self::OPTION;
        }
        if control {
            mask = mask | Self::CONTROL;
        }
        if shift {
            mask = mask | Self::SHIFT;
        }
        mask
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Modifier glyphs in menu order: ⌘ ⌥ ⌃ ⇧.
    pub fn symbols(self) -> String {
        let mut out = String::new();
        if self.contains(Self::COMMAND) {
            out.push('⌘');
        }
        if self.contains(Self::OPTION) {
            out.push('⌥');
        }
        if self.contains(Self::CONTROL) {
            out.push('⌃');
        }
        if self.contains(Self::SHIFT) {
            out.push('⇧');
        }
        out
    }

    fn to_plugin_modifiers(self) -> Option<Modifiers> {
        let mut mods = Modifiers::empty();
        if self.contains(Self::COMMAND) {
            mods |= Modifiers::SUPER;
        }
        if self.contains(Self::OPTION) {
            mods |= Modifiers::ALT;
        }
        if self.contains(Self::CONTROL) {
            mods |= Modifiers::CONTROL;
        }
        if self.contains(Self::SHIFT) {
            mods |= Modifiers::SHIFT;
        }
        if mods.is_empty() {
            None
        } else {
            Some(mods)
        }
    }
}

impl BitOr for ModifierMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutKey {
    pub key_code: u16,
    pub modifiers: ModifierMask,
}

impl ShortcutKey {
    /// ⌘P
    pub const DEFAULT: ShortcutKey = ShortcutKey {
        key_code: 35,
        modifiers: ModifierMask::COMMAND,
    };

    pub fn new(key_code: u16, modifiers: ModifierMask) -> Self {
        Self {
            key_code,
            modifiers: ModifierMask::from_bits_truncate(modifiers.bits()),
        }
    }

    /// Whether a raw key event fires this chord.
    ///
    /// The event flags must contain every chord modifier; extra modifiers are
    /// tolerated, matching how the event monitors have always behaved.
    pub fn matches(&self, key_code: u16, event_flags: u64) -> bool {
        key_code == self.key_code
            && ModifierMask::from_bits_truncate(event_flags).contains(self.modifiers)
    }

    pub fn key_label(&self) -> String {
        match lookup_key_code(self.key_code) {
            Some(def) => def.label.to_string(),
            None => format!("Key{}", self.key_code),
        }
    }

    /// Converts the chord into an accelerator for the system hotkey path.
    pub fn to_shortcut(&self) -> Result<Shortcut, AppError> {
        let def = lookup_key_code(self.key_code).ok_or_else(|| {
            AppError::Shortcut(format!("no accelerator for key code {}", self.key_code))
        })?;
        let code: Code = def.dom_code.parse().map_err(|_| {
            AppError::Shortcut(format!("unrecognized key code name '{}'", def.dom_code))
        })?;
        Ok(Shortcut::new(self.modifiers.to_plugin_modifiers(), code))
    }
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifiers.symbols(), self.key_label())
    }
}

/// A physical key known to the recorder.
#[derive(Debug, Clone, Copy)]
pub struct KeyDef {
    pub key_code: u16,
    pub dom_code: &'static str,
    pub label: &'static str,
}

const fn key(key_code: u16, dom_code: &'static str, label: &'static str) -> KeyDef {
    KeyDef {
        key_code,
        dom_code,
        label,
    }
}

static KEYS: &[KeyDef] = &[
    key(0x00, "KeyA", "A"),
    key(0x01, "KeyS", "S"),
    key(0x02, "KeyD", "D"),
    key(0x03, "KeyF", "F"),
    key(0x04, "KeyH", "H"),
    key(0x05, "KeyG", "G"),
    key(0x06, "KeyZ", "Z"),
    key(0x07, "KeyX", "X"),
    key(0x08, "KeyC", "C"),
    key(0x09, "KeyV", "V"),
    key(0x0B, "KeyB", "B"),
    key(0x0C, "KeyQ", "Q"),
    key(0x0D, "KeyW", "W"),
    key(0x0E, "KeyE", "E"),
    key(0x0F, "KeyR", "R"),
    key(0x10, "KeyY", "Y"),
    key(0x11, "KeyT", "T"),
    key(0x12, "Digit1", "1"),
    key(0x13, "Digit2", "2"),
    key(0x14, "Digit3", "3"),
    key(0x15, "Digit4", "4"),
    key(0x16, "Digit6", "6"),
    key(0x17, "Digit5", "5"),
    key(0x18, "Equal", "="),
    key(0x19, "Digit9", "9"),
    key(0x1A, "Digit7", "7"),
    key(0x1B, "Minus", "-"),
    key(0x1C, "Digit8", "8"),
    key(0x1D, "Digit0", "0"),
    key(0x1E, "BracketRight", "]"),
    key(0x1F, "KeyO", "O"),
    key(0x20, "KeyU", "U"),
    key(0x21, "BracketLeft", "["),
    key(0x22, "KeyI", "I"),
    key(0x23, "KeyP", "P"),
    key(0x24, "Enter", "Return"),
    key(0x25, "KeyL", "L"),
    key(0x26, "KeyJ", "J"),
    key(0x27, "Quote", "'"),
    key(0x28, "KeyK", "K"),
    key(0x29, "Semicolon", ";"),
    key(0x2A, "Backslash", "\\"),
    key(0x2B, "Comma", ","),
    key(0x2C, "Slash", "/"),
    key(0x2D, "KeyN", "N"),
    key(0x2E, "KeyM", "M"),
    key(0x2F, "Period", "."),
    key(0x30, "Tab", "Tab"),
    key(0x31, "Space", "Space"),
    key(0x32, "Backquote", "`"),
    key(0x33, "Backspace", "Delete"),
    key(0x35, "Escape", "Escape"),
    // Modifier keys; the recorder never stores these as the chord key.
    key(0x36, "MetaRight", "⌘"),
    key(0x37, "MetaLeft", "⌘"),
    key(0x38, "ShiftLeft", "⇧"),
    key(0x39, "CapsLock", "⇪"),
    key(0x3A, "AltLeft", "⌥"),
    key(0x3B, "ControlLeft", "⌃"),
    key(0x3C, "ShiftRight", "⇧"),
    key(0x3D, "AltRight", "⌥"),
    key(0x3E, "ControlRight", "⌃"),
    // Keypad
    key(0x41, "NumpadDecimal", "."),
    key(0x43, "NumpadMultiply", "*"),
    key(0x45, "NumpadAdd", "+"),
    key(0x47, "NumLock", "Clear"),
    key(0x4B, "NumpadDivide", "/"),
    key(0x4C, "NumpadEnter", "Enter"),
    key(0x4E, "NumpadSubtract", "-"),
    key(0x51, "NumpadEqual", "="),
    key(0x52, "Numpad0", "0"),
    key(0x53, "Numpad1", "1"),
    key(0x54, "Numpad2", "2"),
    key(0x55, "Numpad3", "3"),
    key(0x56, "Numpad4", "4"),
    key(0x57, "Numpad5", "5"),
    key(0x58, "Numpad6", "6"),
    key(0x59, "Numpad7", "7"),
    key(0x5B, "Numpad8", "8"),
    key(0x5C, "Numpad9", "9"),
    // Function and navigation keys
    key(0x60, "F5", "F5"),
    key(0x61, "F6", "F6"),
    key(0x62, "F7", "F7"),
    key(0x63, "F3", "F3"),
    key(0x64, "F8", "F8"),
    key(0x65, "F9", "F9"),
    key(0x67, "F11", "F11"),
    key(0x6D, "F10", "F10"),
    key(0x6F, "F12", "F12"),
    key(0x73, "Home", "Home"),
    key(0x74, "PageUp", "Page Up"),
    key(0x75, "Delete", "⌦"),
    key(0x76, "F4", "F4"),
    key(0x77, "End", "End"),
    key(0x78, "F2", "F2"),
    key(0x79, "PageDown", "Page Down"),
    key(0x7A, "F1", "F1"),
    key(0x7B, "ArrowLeft", "←"),
    key(0x7C, "ArrowRight", "→"),
    key(0x7D, "ArrowDown", "↓"),
    key(0x7E, "ArrowUp", "↑"),
];

pub fn lookup_key_code(key_code: u16) -> Option<&'static KeyDef> {
    KEYS.iter().find(|k| k.key_code == key_code)
}

pub fn key_code_for_dom_code(dom_code: &str) -> Option<u16> {
    KEYS.iter()
        .find(|k| k.dom_code == dom_code)
        .map(|k| k.key_code)
}

/// Command, shift, caps lock, option and control keys (left and right).
pub fn is_modifier_key(key_code: u16) -> bool {
    (0x36..=0x3E).contains(&key_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chord_is_command_p() {
        assert_eq!(ShortcutKey::DEFAULT.to_string(), "⌘P");
    }

    #[test]
    fn symbols_follow_menu_order() {
        let mask = ModifierMask::SHIFT | ModifierMask::COMMAND | ModifierMask::CONTROL | ModifierMask::OPTION;
        assert_eq!(mask.symbols(), "⌘⌥⌃⇧");
    }

    #[test]
    fn unknown_key_code_falls_back_to_numeric_label() {
        let chord = ShortcutKey::new(200, ModifierMask::CONTROL);
        assert_eq!(chord.to_string(), "⌃Key200");
    }

    #[test]
    fn new_drops_device_dependent_bits() {
        let chord = ShortcutKey::new(35, ModifierMask::from_bits_truncate(0x0010_0108));
        assert_eq!(chord.modifiers, ModifierMask::COMMAND);
    }

    #[test]
    fn matches_requires_key_and_all_modifiers() {
        let chord = ShortcutKey::new(35, ModifierMask::COMMAND | ModifierMask::SHIFT);
        let cmd_shift = (ModifierMask::COMMAND | ModifierMask::SHIFT).bits();

        assert!(chord.matches(35, cmd_shift));
        assert!(chord.matches(35, cmd_shift | ModifierMask::OPTION.bits()));
        assert!(!chord.matches(35, ModifierMask::COMMAND.bits()));
        assert!(!chord.matches(34, cmd_shift));
    }

    #[test]
    fn dom_codes_resolve_to_mac_key_codes() {
        assert_eq!(key_code_for_dom_code("KeyP"), Some(35));
        assert_eq!(key_code_for_dom_code("Digit5"), Some(0x17));
        assert_eq!(key_code_for_dom_code("F12"), Some(0x6F));
        assert_eq!(key_code_for_dom_code("IntlRo"), None);
    }

    #[test]
    fn key_codes_are_unique() {
        for (i, a) in KEYS.iter().enumerate() {
            for b in &KEYS[i + 1..] {
                assert_ne!(a.key_code, b.key_code, "{} and {} collide", a.dom_code, b.dom_code);
            }
        }
    }

    #[test]
    fn modifier_keys_are_detected() {
        for code in ["MetaLeft", "MetaRight", "ShiftLeft", "AltRight", "ControlLeft", "CapsLock"] {
            let key_code = key_code_for_dom_code(code).unwrap();
            assert!(is_modifier_key(key_code), "{code} should be a modifier");
        }
        assert!(!is_modifier_key(35));
    }

    #[test]
    fn every_non_modifier_key_has_an_accelerator() {
        for def in KEYS.iter().filter(|k| !is_modifier_key(k.key_code)) {
            let chord = ShortcutKey::new(def.key_code, ModifierMask::COMMAND);
            assert!(chord.to_shortcut().is_ok(), "{} has no accelerator", def.dom_code);
        }
    }

    #[test]
    fn accelerator_carries_modifiers() {
        let chord = ShortcutKey::new(35, ModifierMask::COMMAND | ModifierMask::OPTION);
        let shortcut = chord.to_shortcut().unwrap();
        assert_eq!(shortcut.mods, Modifiers::SUPER | Modifiers::ALT);
        assert_eq!(shortcut.key, Code::KeyP);
    }

    #[test]
    fn serializes_with_raw_mask() {
        let json = serde_json::to_value(ShortcutKey::DEFAULT).unwrap();
        assert_eq!(json, serde_json::json!({ "keyCode": 35, "modifiers": 1048576 }));
    }
}
