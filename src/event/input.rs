//! Backend-agnostic button identifiers and the crossterm mapping table.
//!
//! The window's `button_down` / `button_up` entry points accept a [`Button`].
//! Hosts driven by crossterm translate raw events with [`ButtonAction::from_crossterm`];
//! other backends build `Button` values directly.

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// MouseButton / DragPhase
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Phase of a drag gesture, carried as the first argument of `MouseDrag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Start,
    Continue,
    End,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// Any input that can be pressed and released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Mouse(MouseButton),
    Key(Key),
    WheelUp,
    WheelDown,
}

impl Button {
    pub const MOUSE_LEFT: Button = Button::Mouse(MouseButton::Left);
    pub const MOUSE_MIDDLE: Button = Button::Mouse(MouseButton::Middle);
    pub const MOUSE_RIGHT: Button = Button::Mouse(MouseButton::Right);

    /// The mouse button, if this is one.
    pub fn mouse(self) -> Option<MouseButton> {
        match self {
            Button::Mouse(b) => Some(b),
            _ => None,
        }
    }
}

impl From<MouseButton> for Button {
    fn from(b: MouseButton) -> Self {
        Button::Mouse(b)
    }
}

impl From<Key> for Button {
    fn from(k: Key) -> Self {
        Button::Key(k)
    }
}

/// A press or release, as translated from a backend event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Down(Button),
    Up(Button),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(b: crossterm::event::MouseButton) -> Self {
        match b {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

impl Key {
    /// Map a crossterm key code. Codes with no counterpart yield `None`.
    pub fn from_crossterm(code: crossterm::event::KeyCode) -> Option<Key> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Insert => Key::Insert,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }
}

impl ButtonAction {
    /// Translate a crossterm event into a press or release.
    ///
    /// Key repeats count as presses. Mouse motion, resize, focus and paste
    /// events are not button input and yield `None`.
    pub fn from_crossterm(event: &crossterm::event::Event) -> Option<ButtonAction> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};
        match event {
            CtEvent::Key(ke) => {
                let key = Key::from_crossterm(ke.code)?;
                match ke.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        Some(ButtonAction::Down(Button::Key(key)))
                    }
                    KeyEventKind::Release => Some(ButtonAction::Up(Button::Key(key))),
                }
            }
            CtEvent::Mouse(me) => match me.kind {
                MouseEventKind::Down(b) => Some(ButtonAction::Down(Button::Mouse(b.into()))),
                MouseEventKind::Up(b) => Some(ButtonAction::Up(Button::Mouse(b.into()))),
                MouseEventKind::ScrollUp => Some(ButtonAction::Down(Button::WheelUp)),
                MouseEventKind::ScrollDown => Some(ButtonAction::Down(Button::WheelDown)),
                _ => None,
            },
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
        MouseEvent, MouseEventKind,
    };

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    // ── Button ───────────────────────────────────────────────────────

    #[test]
    fn button_mouse_accessor() {
        assert_eq!(Button::MOUSE_LEFT.mouse(), Some(MouseButton::Left));
        assert_eq!(Button::Key(Key::Enter).mouse(), None);
        assert_eq!(Button::from(MouseButton::Right), Button::MOUSE_RIGHT);
    }

    // ── Key mapping ──────────────────────────────────────────────────

    #[test]
    fn key_codes_map() {
        for (code, expected) in [
            (KeyCode::Char('x'), Key::Char('x')),
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::F(5), Key::F(5)),
            (KeyCode::PageDown, Key::PageDown),
            (KeyCode::Insert, Key::Insert),
        ] {
            assert_eq!(Key::from_crossterm(code), Some(expected));
        }
    }

    #[test]
    fn unmapped_key_code_is_none() {
        assert_eq!(Key::from_crossterm(KeyCode::CapsLock), None);
        assert_eq!(Key::from_crossterm(KeyCode::Null), None);
    }

    // ── Event translation ────────────────────────────────────────────

    #[test]
    fn key_press_and_release() {
        let press = CtEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(
            ButtonAction::from_crossterm(&press),
            Some(ButtonAction::Down(Button::Key(Key::Char('a'))))
        );

        let release = CtEvent::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(
            ButtonAction::from_crossterm(&release),
            Some(ButtonAction::Up(Button::Key(Key::Char('a'))))
        );
    }

    #[test]
    fn mouse_buttons_translate() {
        use crossterm::event::MouseButton as CtButton;
        assert_eq!(
            ButtonAction::from_crossterm(&mouse(MouseEventKind::Down(CtButton::Left))),
            Some(ButtonAction::Down(Button::MOUSE_LEFT))
        );
        assert_eq!(
            ButtonAction::from_crossterm(&mouse(MouseEventKind::Up(CtButton::Middle))),
            Some(ButtonAction::Up(Button::MOUSE_MIDDLE))
        );
        assert_eq!(
            ButtonAction::from_crossterm(&mouse(MouseEventKind::ScrollUp)),
            Some(ButtonAction::Down(Button::WheelUp))
        );
    }

    #[test]
    fn motion_is_not_button_input() {
        assert_eq!(ButtonAction::from_crossterm(&mouse(MouseEventKind::Moved)), None);
        assert_eq!(ButtonAction::from_crossterm(&CtEvent::Resize(80, 24)), None);
        assert_eq!(ButtonAction::from_crossterm(&CtEvent::FocusGained), None);
    }
}
