//! Keyboard triggers for submission.

/// A key, reduced to what the chat input cares about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,

    /// A printable character.
    Char(char),

    /// Anything else.
    Other,
}

/// A key press delivered to the input control.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key pressed.
    pub key: Key,

    /// Whether shift was held.
    pub shift: bool,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    /// A key press with shift held.
    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }

    /// Plain Enter.
    pub fn enter() -> Self {
        Self::new(Key::Enter)
    }
}

/// What should happen in response to a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Submit the input, suppressing the key's default effect.
    Submit,

    /// Let the input control handle the key as usual.
    Default,
}

/// Classify a key press.
///
/// Enter submits; Shift+Enter inserts a newline like any other edit.
pub fn key_action(event: &KeyEvent) -> KeyAction {
    match event.key {
        Key::Enter if !event.shift => KeyAction::Submit,
        _ => KeyAction::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits() {
        let action = key_action(&KeyEvent::enter());
        assert_eq!(action, KeyAction::Submit);
    }

    #[test]
    fn shift_enter_is_default() {
        let action = key_action(&KeyEvent::shifted(Key::Enter));
        assert_eq!(action, KeyAction::Default);
    }

    #[test]
    fn other_keys_are_default() {
        assert_eq!(key_action(&KeyEvent::new(Key::Char('a'))), KeyAction::Default);
        assert_eq!(key_action(&KeyEvent::shifted(Key::Char('A'))), KeyAction::Default);
        assert_eq!(key_action(&KeyEvent::new(Key::Other)), KeyAction::Default);
    }
}
