use std::cell::Cell;

use bitflags::bitflags;

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

bitflags! {
    /// Buttons held down at the time of a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 1;
        const SECONDARY = 1 << 1;
        const TERTIARY = 1 << 2;
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(b: PointerButton) -> Self {
        match b {
            PointerButton::Primary => PointerButtons::PRIMARY,
            PointerButton::Secondary => PointerButtons::SECONDARY,
            PointerButton::Tertiary => PointerButtons::TERTIARY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
}

#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub event: PointerEventKind,
    pub position: Vec2,
    pub buttons: PointerButtons,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn is_down(&self) -> bool {
        matches!(self.event, PointerEventKind::Down(_))
    }
    pub fn is_up(&self) -> bool {
        matches!(self.event, PointerEventKind::Up(_))
    }
    pub fn is_move(&self) -> bool {
        matches!(self.event, PointerEventKind::Move)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Enter,
    KeypadEnter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8), // F1-F12
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Clone, Debug)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    pub modifiers: Modifiers,
    pub is_repeat: bool,
    consumed: Cell<bool>,
}

impl KeyEvent {
    pub fn new(key: Key, state: KeyState) -> Self {
        Self {
            key,
            state,
            modifiers: Modifiers::default(),
            is_repeat: false,
            consumed: Cell::new(false),
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }

    /// Claims this key press so widgets dispatched after the claimant ignore it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

#[derive(Clone, Debug)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

impl InputEvent {
    /// Pointer motion with no buttons held.
    pub fn mouse_move(x: f32, y: f32) -> Self {
        Self::pointer(PointerEventKind::Move, x, y, PointerButtons::empty())
    }

    /// Pointer motion with the primary button held.
    pub fn mouse_drag(x: f32, y: f32) -> Self {
        Self::pointer(PointerEventKind::Move, x, y, PointerButtons::PRIMARY)
    }

    pub fn mouse_down(x: f32, y: f32) -> Self {
        Self::pointer(
            PointerEventKind::Down(PointerButton::Primary),
            x,
            y,
            PointerButtons::PRIMARY,
        )
    }

    pub fn mouse_up(x: f32, y: f32) -> Self {
        Self::pointer(
            PointerEventKind::Up(PointerButton::Primary),
            x,
            y,
            PointerButtons::empty(),
        )
    }

    pub fn pointer(event: PointerEventKind, x: f32, y: f32, buttons: PointerButtons) -> Self {
        InputEvent::Pointer(PointerEvent {
            event,
            position: Vec2::new(x, y),
            buttons,
            modifiers: Modifiers::default(),
        })
    }

    pub fn key_down(key: Key) -> Self {
        InputEvent::Key(KeyEvent::new(key, KeyState::Pressed))
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::Key(KeyEvent::new(key, KeyState::Released))
    }

    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            InputEvent::Pointer(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(k) => Some(k),
            _ => None,
        }
    }
}
