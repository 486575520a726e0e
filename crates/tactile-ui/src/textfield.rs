//! Single-line editable text.
//!
//! The cursor is a byte offset that always sits on a grapheme boundary, so
//! backspace and the arrow keys step over whole clusters.

use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

use tactile_core::*;
use tactile_text::Font;
use unicode_segmentation::UnicodeSegmentation;
use web_time::Instant;

use crate::widget::{Callback, Widget, WidgetBase};

const BLINK_PERIOD: Duration = Duration::from_millis(500);

/// Key repeat synthesized by the field while a key is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRepeat {
    pub delay: Duration,
    pub interval: Duration,
    pub enabled: bool,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            interval: Duration::from_millis(50),
            enabled: true,
        }
    }
}

impl KeyRepeat {
    /// Only host repeat events (if any) are honoured.
    pub fn off() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct HeldKey {
    key: Key,
    next_at: Instant,
}

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

/// Byte offset of the `n`th grapheme boundary, clamped to the end.
fn nth_boundary(text: &str, n: usize) -> usize {
    text.grapheme_indices(true)
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn is_repeatable(key: Key) -> bool {
    matches!(
        key,
        Key::Character(_) | Key::Backspace | Key::Delete | Key::ArrowLeft | Key::ArrowRight
    )
}

/// An editable single-line field.
///
/// Focus lives in a shared cell so a field can hand it to the next one on
/// tab. Nothing stops two fields from being focused at once; both will then
/// take key presses.
pub struct InputText {
    base: WidgetBase,
    text: String,
    cursor: usize,
    focus: Rc<Cell<bool>>,
    next_on_tab: Option<Rc<Cell<bool>>>,
    font: Rc<dyn TextMeasure>,
    text_color: Color,
    background: Color,
    focus_color: Color,
    mask: Option<char>,
    keep_focus_on_submit: bool,
    on_submit: Option<Callback>,
    clock: Rc<dyn Clock>,
    blink_start: Instant,
    caret_on: bool,
    repeat: KeyRepeat,
    held: Option<HeldKey>,
}

impl InputText {
    pub fn new(loc: impl Into<Vec2>, value: impl Display) -> Self {
        let t = theme();
        let font: Rc<dyn TextMeasure> = Rc::new(Font::system(t.font_size));
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        let text = value.to_string();
        let now = clock.now();
        Self {
            base: WidgetBase::new(loc.into(), Size::new(t.input_width, font.line_height())),
            cursor: text.len(),
            text,
            focus: Rc::new(Cell::new(false)),
            next_on_tab: None,
            font,
            text_color: t.text,
            background: t.input_background,
            focus_color: t.focus,
            mask: None,
            keep_focus_on_submit: false,
            on_submit: None,
            clock,
            blink_start: now,
            caret_on: true,
            repeat: KeyRepeat::default(),
            held: None,
        }
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    pub fn width(mut self, w: f32) -> Self {
        let h = self.base.rect.h;
        self.base.set_size(Size::new(w, h));
        self
    }

    pub fn font(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.font = Rc::new(measure);
        let w = self.base.rect.w;
        self.base.set_size(Size::new(w, self.font.line_height()));
        self
    }

    pub fn colors(mut self, text: Color, background: Color, focus: Color) -> Self {
        self.text_color = text;
        self.background = background;
        self.focus_color = focus;
        self
    }

    pub fn focused(self, focus: bool) -> Self {
        self.focus.set(focus);
        self
    }

    /// Draws `c` once per grapheme instead of the text itself.
    pub fn mask(mut self, c: char) -> Self {
        self.mask = Some(c);
        self
    }

    pub fn keep_focus_on_submit(mut self, keep: bool) -> Self {
        self.keep_focus_on_submit = keep;
        self
    }

    /// Called on enter with the field's nickname.
    pub fn on_submit(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_submit = Some(Rc::new(f));
        self
    }

    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.blink_start = clock.now();
        self.clock = clock;
        self
    }

    pub fn key_repeat(mut self, repeat: KeyRepeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Replaces the text and puts the cursor at its end.
    pub fn set_value(&mut self, value: impl Display) {
        self.text = value.to_string();
        self.cursor = self.text.len();
        self.reset_caret_blink();
    }

    pub fn clear_text(&mut self, keep_focus: bool) {
        self.text.clear();
        self.cursor = 0;
        self.held = None;
        self.focus.set(keep_focus);
    }

    pub fn give_focus(&mut self) {
        self.focus.set(true);
        self.reset_caret_blink();
    }

    pub fn remove_focus(&mut self) {
        self.focus.set(false);
        self.held = None;
    }

    pub fn has_focus(&self) -> bool {
        self.focus.get()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// On tab, this field drops focus and `next` takes it.
    pub fn set_next_field_on_tab(&mut self, next: &InputText) {
        self.next_on_tab = Some(next.focus.clone());
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_on
    }

    /// Per-frame tick: fires synthesized key repeats and advances the caret
    /// blink.
    pub fn update(&mut self) {
        let now = self.clock.now();
        if let Some(held) = self.held {
            if !self.has_focus() {
                self.held = None;
            } else if now >= held.next_at {
                let interval = self.repeat.interval.max(Duration::from_millis(1));
                let mut next_at = held.next_at;
                while next_at <= now {
                    self.apply(held.key);
                    next_at += interval;
                }
                self.held = Some(HeldKey {
                    key: held.key,
                    next_at,
                });
            }
        }
        let phase = now.saturating_duration_since(self.blink_start).as_millis()
            / BLINK_PERIOD.as_millis();
        self.caret_on = phase % 2 == 0;
    }

    fn reset_caret_blink(&mut self) {
        self.blink_start = self.clock.now();
        self.caret_on = true;
    }

    fn displayed(&self) -> String {
        match self.mask {
            Some(c) => std::iter::repeat_n(c, self.text.graphemes(true).count()).collect(),
            None => self.text.clone(),
        }
    }

    /// Width of the displayed text up to the cursor.
    fn caret_x(&self) -> f32 {
        let before = &self.text[..self.cursor];
        match self.mask {
            Some(c) => {
                let masked: String =
                    std::iter::repeat_n(c, before.graphemes(true).count()).collect();
                self.font.advance(&masked)
            }
            None => self.font.advance(before),
        }
    }

    fn place_cursor(&mut self, x: f32) {
        let shown = self.displayed();
        let byte = nearest_stop(&self.font.caret_stops(&shown), x);
        let n = shown[..byte].graphemes(true).count();
        self.cursor = nth_boundary(&self.text, n);
    }

    /// One editing key; `false` when the key is not an editing key.
    fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Character(c) if !c.is_control() => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_grapheme_boundary(&self.text, self.cursor);
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    let next = next_grapheme_boundary(&self.text, self.cursor);
                    self.text.replace_range(self.cursor..next, "");
                }
            }
            Key::ArrowLeft => self.cursor = prev_grapheme_boundary(&self.text, self.cursor),
            Key::ArrowRight => self.cursor = next_grapheme_boundary(&self.text, self.cursor),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            _ => return false,
        }
        self.reset_caret_blink();
        true
    }

    fn handle_key(&mut self, k: &KeyEvent) -> bool {
        if k.is_consumed() || !self.has_focus() {
            return false;
        }
        if !k.is_pressed() {
            if self.held.is_some_and(|h| h.key == k.key) {
                self.held = None;
            }
            return false;
        }
        if k.is_repeat && self.repeat.enabled {
            return false;
        }
        match k.key {
            Key::Enter | Key::KeypadEnter => {
                self.held = None;
                self.focus.set(self.keep_focus_on_submit);
                log::debug!("input `{}` submitted {:?}", self.base.nickname, self.text);
                if let Some(cb) = &self.on_submit {
                    cb(&self.base.nickname);
                }
                true
            }
            Key::Tab => {
                if let Some(next) = &self.next_on_tab {
                    self.focus.set(false);
                    self.held = None;
                    next.set(true);
                    k.consume();
                }
                false
            }
            key => {
                if self.apply(key) && self.repeat.enabled && is_repeatable(key) {
                    self.held = Some(HeldKey {
                        key,
                        next_at: self.clock.now() + self.repeat.delay,
                    });
                }
                false
            }
        }
    }
}

impl Widget for InputText {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.base.is_live() {
            return false;
        }
        match event {
            InputEvent::Key(k) => self.handle_key(k),
            InputEvent::Pointer(p) => {
                if p.event != PointerEventKind::Down(PointerButton::Primary) {
                    return false;
                }
                if self.base.rect.contains(p.position) {
                    if self.has_focus() {
                        self.place_cursor(p.position.x - self.base.loc.x);
                    } else {
                        self.focus.set(true);
                    }
                    self.reset_caret_blink();
                } else {
                    self.remove_focus();
                }
                false
            }
        }
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        let r = self.base.rect;
        let focused = self.has_focus();
        if focused {
            scene.border(r.inflate(theme().focus_inset), self.focus_color, 1.0);
        }
        scene.fill_rect(r, self.background);

        let shown = self.displayed();
        scene.push(SceneNode::PushClip { rect: r });
        scene.push(SceneNode::Text {
            rect: Rect::new(r.x, r.y, self.font.advance(&shown), r.h),
            text: shown,
            color: self.text_color,
            size: self.font.font_size(),
            family: self.font.family().map(str::to_string),
        });
        scene.push(SceneNode::PopClip);

        if focused && self.caret_on {
            let cx = self.caret_x();
            if cx < r.w {
                let x = r.x + if self.cursor > 0 { cx - 1.0 } else { cx };
                scene.line(
                    Vec2::new(x, r.y),
                    Vec2::new(x, r.y + r.h),
                    self.text_color,
                    1.0,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn field(value: &str) -> (InputText, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let f = InputText::new((0.0, 0.0), value)
            .font(FixedAdvance::new(10.0, 20.0))
            .clock(clock.clone())
            .focused(true);
        (f, clock)
    }

    fn press(f: &mut InputText, key: Key) -> bool {
        f.handle_event(&InputEvent::key_down(key))
    }

    fn type_str(f: &mut InputText, s: &str) {
        for c in s.chars() {
            press(f, Key::Character(c));
            f.handle_event(&InputEvent::key_up(Key::Character(c)));
        }
    }

    #[test]
    fn backspace_and_delete() {
        let (mut f, _) = field("abc");
        assert_eq!(f.cursor(), 3);
        press(&mut f, Key::Backspace);
        assert_eq!((f.value(), f.cursor()), ("ab", 2));

        let (mut f, _) = field("abc");
        press(&mut f, Key::Home);
        press(&mut f, Key::Delete);
        assert_eq!((f.value(), f.cursor()), ("bc", 0));
        press(&mut f, Key::Backspace);
        assert_eq!((f.value(), f.cursor()), ("bc", 0));
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let (mut f, _) = field("ab");
        press(&mut f, Key::ArrowRight);
        assert_eq!(f.cursor(), 2);
        for _ in 0..4 {
            press(&mut f, Key::ArrowLeft);
        }
        assert_eq!(f.cursor(), 0);
        press(&mut f, Key::End);
        assert_eq!(f.cursor(), 2);
    }

    #[test]
    fn edits_step_over_whole_graphemes() {
        let (mut f, _) = field("a👍🏽");
        press(&mut f, Key::Backspace);
        assert_eq!(f.value(), "a");
        f.set_value("e\u{301}x");
        press(&mut f, Key::ArrowLeft);
        press(&mut f, Key::ArrowLeft);
        assert_eq!(f.cursor(), 0);
        press(&mut f, Key::Delete);
        assert_eq!(f.value(), "x");
    }

    #[test]
    fn typing_inserts_at_cursor_and_ignores_others() {
        let (mut f, _) = field("ac");
        press(&mut f, Key::ArrowLeft);
        type_str(&mut f, "b");
        assert_eq!(f.value(), "abc");
        for k in [Key::ArrowUp, Key::ArrowDown, Key::Escape, Key::Character('\u{7}')] {
            assert!(!press(&mut f, k));
        }
        assert_eq!(f.value(), "abc");
    }

    #[test]
    fn unfocused_field_ignores_keys() {
        let (f, _) = field("x");
        let mut f = f.focused(false);
        press(&mut f, Key::Character('y'));
        assert_eq!(f.value(), "x");
    }

    #[test]
    fn enter_submits_and_drops_focus() {
        init_logs();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let (f, _) = field("name");
        let mut f = f
            .nickname("who")
            .on_submit(move |n| s.borrow_mut().push(n.to_string()));
        assert!(press(&mut f, Key::Enter));
        assert!(!f.has_focus());
        assert_eq!(*seen.borrow(), ["who"]);

        let (f, _) = field("");
        let mut f = f.keep_focus_on_submit(true);
        assert!(press(&mut f, Key::KeypadEnter));
        assert!(f.has_focus());
    }

    #[test]
    fn tab_hands_focus_on_once() {
        let (mut a, _) = field("");
        let (b, _) = field("");
        let (c, _) = field("");
        let mut b = b.focused(false);
        let c = c.focused(false);
        a.set_next_field_on_tab(&b);
        b.set_next_field_on_tab(&c);

        let tab = InputEvent::key_down(Key::Tab);
        a.handle_event(&tab);
        b.handle_event(&tab);
        assert!(!a.has_focus());
        assert!(b.has_focus());
        assert!(!c.has_focus());
    }

    #[test]
    fn clicks_focus_then_place_the_cursor() {
        let (f, _) = field("hello");
        let mut f = f.focused(false);
        f.handle_event(&InputEvent::mouse_down(23.0, 5.0));
        assert!(f.has_focus());
        assert_eq!(f.cursor(), 5);
        f.handle_event(&InputEvent::mouse_down(23.0, 5.0));
        assert_eq!(f.cursor(), 2);
        f.handle_event(&InputEvent::mouse_down(500.0, 5.0));
        assert!(!f.has_focus());
    }

    #[test]
    fn mask_hides_text_only() {
        let (f, _) = field("pw");
        let f = f.mask('*');
        let mut scene = Scene::new();
        f.draw(&mut scene);
        let shown = scene.nodes.iter().find_map(|n| match n {
            SceneNode::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(shown.as_deref(), Some("**"));
        assert_eq!(f.value(), "pw");
    }

    #[test]
    fn held_key_repeats_after_delay() {
        let (mut f, clock) = field("");
        press(&mut f, Key::Character('x'));
        clock.advance(ms(499));
        f.update();
        assert_eq!(f.value(), "x");
        clock.advance(ms(1));
        f.update();
        assert_eq!(f.value(), "xx");
        clock.advance(ms(50));
        f.update();
        assert_eq!(f.value(), "xxx");

        f.handle_event(&InputEvent::key_up(Key::Character('x')));
        clock.advance(ms(1000));
        f.update();
        assert_eq!(f.value(), "xxx");
    }

    #[test]
    fn host_repeats_are_ignored_while_synthesizing() {
        let (mut f, _) = field("");
        let mut k = KeyEvent::new(Key::Character('y'), KeyState::Pressed);
        k.is_repeat = true;
        f.handle_event(&InputEvent::Key(k.clone()));
        assert_eq!(f.value(), "");

        let mut f = f.key_repeat(KeyRepeat::off());
        f.handle_event(&InputEvent::Key(k));
        assert_eq!(f.value(), "y");
    }

    #[test]
    fn caret_blinks_and_edits_restart_it() {
        let (mut f, clock) = field("a");
        f.update();
        assert!(f.caret_visible());
        clock.advance(ms(500));
        f.update();
        assert!(!f.caret_visible());
        press(&mut f, Key::ArrowLeft);
        assert!(f.caret_visible());
        clock.advance(ms(1000));
        f.update();
        assert!(f.caret_visible());
    }

    #[test]
    fn draws_focus_ring_and_caret() {
        let (f, _) = field("ab");
        let mut scene = Scene::new();
        f.draw(&mut scene);
        let ring = scene.nodes.iter().find_map(|n| match n {
            SceneNode::Border { rect, .. } => Some(*rect),
            _ => None,
        });
        assert_eq!(ring, Some(Rect::new(-3.0, -3.0, 206.0, 26.0)));
        let caret = scene.nodes.iter().find_map(|n| match n {
            SceneNode::Line { from, .. } => Some(*from),
            _ => None,
        });
        assert_eq!(caret, Some(Vec2::new(19.0, 0.0)));
    }

    #[test]
    fn clear_text_resets_cursor() {
        let (mut f, _) = field("abc");
        f.clear_text(true);
        assert_eq!((f.value(), f.cursor()), ("", 0));
        assert!(f.has_focus());
        f.clear_text(false);
        assert!(!f.has_focus());
    }
}
