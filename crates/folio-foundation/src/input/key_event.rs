//! Keyboard input event types.
//!
//! Only the keys the carousel family reacts to get their own code; everything
//! else maps to [`KeyCode::Unknown`] and is ignored by the widgets.

use std::fmt;

/// Type of keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down.
    KeyDown,
    /// Key was released.
    KeyUp,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns true if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    Tab,
    Escape,

    /// Key not recognized or not mapped.
    Unknown,
}

impl KeyCode {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
            "ArrowRight" | "Right" => KeyCode::ArrowRight,
            "Tab" => KeyCode::Tab,
            "Escape" | "Esc" => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}

/// A keyboard input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: KeyCode,
    pub modifiers: Modifiers,
    pub event_type: KeyEventType,
}

impl KeyEvent {
    pub fn new(key_code: KeyCode, modifiers: Modifiers, event_type: KeyEventType) -> Self {
        Self {
            key_code,
            modifiers,
            event_type,
        }
    }

    /// Creates a key down event without modifiers.
    pub fn key_down(key_code: KeyCode) -> Self {
        Self::new(key_code, Modifiers::NONE, KeyEventType::KeyDown)
    }

    pub fn key_down_with_modifiers(key_code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(key_code, modifiers, KeyEventType::KeyDown)
    }

    pub fn is_key_down(&self) -> bool {
        self.event_type == KeyEventType::KeyDown
    }

    pub fn is_key_up(&self) -> bool {
        self.event_type == KeyEventType::KeyUp
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyEvent({:?}, {:?})", self.key_code, self.event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map_to_codes() {
        assert_eq!(KeyCode::from_dom_key("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_key("Esc"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from_dom_key("Right"), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from_dom_key("Tab"), KeyCode::Tab);
        assert_eq!(KeyCode::from_dom_key("q"), KeyCode::Unknown);
        assert_eq!(KeyCode::from_dom_key("Enter"), KeyCode::Unknown);
        assert_eq!(KeyCode::from_dom_key("ArrowUp"), KeyCode::Unknown);
    }

    #[test]
    fn key_down_has_no_modifiers() {
        let event = KeyEvent::key_down(KeyCode::Tab);
        assert!(event.is_key_down());
        assert!(!event.modifiers.any());
    }

    #[test]
    fn modifiers_any() {
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::SHIFT.any());
    }
}
