//! Pointer tracking shared by buttons, checkboxes and radio buttons.

use tactile_core::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickState {
    #[default]
    Idle,
    /// Hovered with no button held.
    Over,
    /// Pressed while over the widget.
    Armed,
    /// Pressed, then the pointer left without releasing.
    Disarmed,
}

/// The idle/over/armed/disarmed machine behind push buttons.
#[derive(Clone, Debug, Default)]
pub struct ClickMachine {
    state: ClickState,
}

impl ClickMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
    }

    /// Feeds one pointer event; `true` when a press that began inside `rect`
    /// is released inside it.
    pub fn handle(&mut self, rect: &Rect, ev: &PointerEvent) -> bool {
        use ClickState::*;
        use PointerEventKind::*;

        let inside = rect.contains(ev.position);
        let (next, clicked) = match (self.state, ev.event) {
            // Rolling over while a button is held somewhere else does nothing.
            (Idle, Move) if inside && ev.buttons.is_empty() => (Over, false),
            (Idle, Up(_)) if inside => (Over, false),

            (Over, Down(_)) if inside => (Armed, false),
            (Over, Move) if !inside => (Idle, false),

            (Armed, Up(_)) if inside => (Over, true),
            (Armed, Move) if !inside => (Disarmed, false),

            (Disarmed, Up(_)) => (Idle, false),
            (Disarmed, _) if inside => (Armed, false),

            (s, _) => (s, false),
        };
        if next != self.state {
            log::trace!("click state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        clicked
    }
}

/// Press tracking for toggles: a click needs both the press and the release
/// to land on the widget.
#[derive(Clone, Debug, Default)]
pub struct PressTracker {
    mouse_over: bool,
    down_over: bool,
    mouse_down: bool,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, rect: &Rect, ev: &PointerEvent) -> bool {
        let inside = rect.contains(ev.position);
        self.mouse_over = inside;
        match ev.event {
            PointerEventKind::Down(_) => {
                self.mouse_down = true;
                self.down_over = inside;
                false
            }
            PointerEventKind::Up(_) => {
                let clicked = self.down_over && inside;
                self.mouse_down = false;
                self.down_over = false;
                clicked
            }
            PointerEventKind::Move => false,
        }
    }

    /// Held down over the widget after a press that started on it.
    pub fn shows_pressed(&self) -> bool {
        self.mouse_down && self.down_over && self.mouse_over
    }

    pub fn is_over(&self) -> bool {
        self.mouse_over
    }
}
