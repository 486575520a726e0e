use std::rc::Rc;

use tactile_core::error::Result;
use tactile_core::*;
use tactile_text::Font;

use crate::clickable::{ClickMachine, ClickState};
use crate::widget::{Callback, Widget, WidgetBase};

enum ButtonLook {
    Text {
        label: String,
        font: Rc<dyn TextMeasure>,
        width: Option<f32>,
        height: f32,
        text_color: Color,
        up: Color,
        over: Color,
        down: Color,
    },
    Images {
        up: ImageHandle,
        over: ImageHandle,
        down: ImageHandle,
        disabled: ImageHandle,
    },
}

/// A push button, drawn from a text label or skinned with images.
///
/// ```rust
/// use tactile_core::*;
/// use tactile_ui::*;
///
/// let mut ok = Button::text((10.0, 10.0), "OK").font(FixedAdvance::new(8.0, 16.0));
/// ok.handle_event(&InputEvent::mouse_move(20.0, 20.0));
/// ok.handle_event(&InputEvent::mouse_down(20.0, 20.0));
/// assert!(ok.handle_event(&InputEvent::mouse_up(20.0, 20.0)));
/// ```
pub struct Button {
    base: WidgetBase,
    machine: ClickMachine,
    look: ButtonLook,
    activation_key: Option<Key>,
    sound: Option<SoundHandle>,
    on_click: Option<Callback>,
}

impl Button {
    /// A text button; the label doubles as the nickname.
    pub fn text(loc: impl Into<Vec2>, label: impl Into<String>) -> Self {
        let t = theme();
        let label = label.into();
        let mut b = Self {
            base: WidgetBase::new(loc.into(), Size::ZERO),
            machine: ClickMachine::new(),
            look: ButtonLook::Text {
                label: label.clone(),
                font: Rc::new(Font::system(t.font_size)),
                width: None,
                height: t.button_height,
                text_color: t.text,
                up: t.button_up,
                over: t.button_over,
                down: t.button_down,
            },
            activation_key: None,
            sound: None,
            on_click: None,
        };
        b.base.nickname = label;
        b.relayout();
        b
    }

    /// An image button; over, down and disabled looks default to `up`.
    pub fn custom(loc: impl Into<Vec2>, up: impl Into<ImageSource>) -> Result<Self> {
        let up = resolve_or_blank(up.into())?;
        let mut b = Self {
            base: WidgetBase::new(loc.into(), up.size()),
            machine: ClickMachine::new(),
            look: ButtonLook::Images {
                over: up.clone(),
                down: up.clone(),
                disabled: up.clone(),
                up,
            },
            activation_key: None,
            sound: None,
            on_click: None,
        };
        b.relayout();
        Ok(b)
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    pub fn on_click(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn sound(mut self, sound: SoundHandle) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Enter clicks the button regardless of the pointer.
    pub fn enter_to_activate(self) -> Self {
        self.activation_key(Key::Enter)
    }

    pub fn activation_key(mut self, key: Key) -> Self {
        self.activation_key = Some(key);
        self
    }

    pub fn font(mut self, measure: impl TextMeasure + 'static) -> Self {
        if let ButtonLook::Text { font, .. } = &mut self.look {
            *font = Rc::new(measure);
        }
        self.relayout();
        self
    }

    /// Fixed width; by default the button fits its label, but is never
    /// narrower than the theme's minimum.
    pub fn width(mut self, w: f32) -> Self {
        if let ButtonLook::Text { width, .. } = &mut self.look {
            *width = Some(w);
        }
        self.relayout();
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        if let ButtonLook::Text { height, .. } = &mut self.look {
            *height = h;
        }
        self.relayout();
        self
    }

    pub fn colors(mut self, up_color: Color, over_color: Color, down_color: Color) -> Self {
        if let ButtonLook::Text { up, over, down, .. } = &mut self.look {
            (*up, *over, *down) = (up_color, over_color, down_color);
        }
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        if let ButtonLook::Text { text_color, .. } = &mut self.look {
            *text_color = color;
        }
        self
    }

    pub fn over_image(mut self, src: impl Into<ImageSource>) -> Result<Self> {
        if let Some(img) = src.into().resolve()? {
            if let ButtonLook::Images { over, .. } = &mut self.look {
                *over = img;
            }
        }
        Ok(self)
    }

    pub fn down_image(mut self, src: impl Into<ImageSource>) -> Result<Self> {
        if let Some(img) = src.into().resolve()? {
            if let ButtonLook::Images { down, .. } = &mut self.look {
                *down = img;
            }
        }
        Ok(self)
    }

    pub fn disabled_image(mut self, src: impl Into<ImageSource>) -> Result<Self> {
        if let Some(img) = src.into().resolve()? {
            if let ButtonLook::Images { disabled, .. } = &mut self.look {
                *disabled = img;
            }
        }
        Ok(self)
    }

    pub fn state(&self) -> ClickState {
        self.machine.state()
    }

    fn padded(label: &str) -> String {
        format!(" {label} ")
    }

    fn relayout(&mut self) {
        let size = match &self.look {
            ButtonLook::Text {
                label,
                font,
                width,
                height,
                ..
            } => {
                let w = width.unwrap_or_else(|| {
                    font.advance(&Self::padded(label))
                        .max(theme().button_min_width)
                });
                Size::new(w, *height)
            }
            ButtonLook::Images { up, .. } => up.size(),
        };
        self.base.set_size(size);
    }

    fn fire(&self) {
        log::debug!("button `{}` clicked", self.base.nickname);
        if let Some(s) = &self.sound {
            s.play();
        }
        if let Some(cb) = &self.on_click {
            cb(&self.base.nickname);
        }
    }

    fn draw_text_look(&self, scene: &mut Scene) {
        let ButtonLook::Text {
            label,
            font,
            text_color,
            up,
            over,
            down,
            ..
        } = &self.look
        else {
            return;
        };
        let t = theme();
        let r = self.base.rect;
        let enabled = self.base.enabled;
        let state = self.machine.state();
        let pressed = enabled && state == ClickState::Armed;

        let fill = match (enabled, state) {
            (false, _) => t.button_disabled,
            (true, ClickState::Armed) => *down,
            (true, ClickState::Over) => *over,
            (true, _) => *up,
        };
        scene.fill_rect(r, fill);

        let text = Self::padded(label);
        let tw = font.advance(&text);
        let th = font.line_height();
        let nudge = if pressed { 1.0 } else { 0.0 };
        scene.push(SceneNode::Text {
            rect: Rect::new(
                r.x + ((r.w - tw) / 2.0).floor() + nudge,
                r.y + ((r.h - th) / 2.0).floor() + nudge,
                tw,
                th,
            ),
            text,
            color: if enabled { *text_color } else { Color::GRAY },
            size: font.font_size(),
            family: font.family().map(str::to_string),
        });

        if !enabled {
            bevel(scene, r, t.bevel, t.bevel, t.bevel);
            return;
        }
        let key_activated = self.activation_key.is_some() && state != ClickState::Armed;
        scene.border(r, t.edge, if key_activated { 2.0 } else { 1.0 });
        if pressed {
            // Shadow on the top/left reads as sunk in.
            bevel(scene, r, t.shadow, t.highlight, t.bevel);
        } else {
            bevel(scene, r, t.highlight, t.shadow, t.bevel);
        }
    }
}

// Top/left lines in `light`, bottom/right in `dark`, then an inner line.
fn bevel(scene: &mut Scene, r: Rect, light: Color, dark: Color, inner: Color) {
    let (l, t, rt, b) = (r.x + 1.0, r.y + 1.0, r.x + r.w - 1.0, r.y + r.h - 1.0);
    scene.line(Vec2::new(l, t), Vec2::new(rt - 1.0, t), light, 1.0);
    scene.line(Vec2::new(l, t), Vec2::new(l, b - 1.0), light, 1.0);
    scene.line(Vec2::new(l, b), Vec2::new(rt, b), dark, 1.0);
    scene.line(Vec2::new(rt, t), Vec2::new(rt, b), dark, 1.0);
    scene.line(Vec2::new(l + 1.0, b - 1.0), Vec2::new(rt - 1.0, b - 1.0), inner, 1.0);
    scene.line(Vec2::new(rt - 1.0, t + 1.0), Vec2::new(rt - 1.0, b - 1.0), inner, 1.0);
}

pub(crate) fn resolve_or_blank(src: ImageSource) -> Result<ImageHandle> {
    Ok(src.resolve()?.unwrap_or_else(|| ImageHandle::blank(0, 0)))
}

impl Widget for Button {
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
            InputEvent::Key(k) => {
                if k.is_pressed() && !k.is_consumed() && Some(k.key) == self.activation_key {
                    self.fire();
                    return true;
                }
                false
            }
            InputEvent::Pointer(p) => {
                let clicked = self.machine.handle(&self.base.rect, p);
                if clicked {
                    self.fire();
                }
                clicked
            }
        }
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        match &self.look {
            ButtonLook::Text { .. } => self.draw_text_look(scene),
            ButtonLook::Images {
                up,
                over,
                down,
                disabled,
            } => {
                let img = if !self.base.enabled {
                    disabled
                } else {
                    match self.machine.state() {
                        ClickState::Armed => down,
                        ClickState::Over => over,
                        ClickState::Idle | ClickState::Disarmed => up,
                    }
                };
                scene.image(img, self.base.loc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ok_button() -> Button {
        Button::text((10.0, 10.0), "OK").font(FixedAdvance::new(8.0, 16.0))
    }

    fn click_at(b: &mut Button, x: f32, y: f32) -> bool {
        b.handle_event(&InputEvent::mouse_move(x, y));
        b.handle_event(&InputEvent::mouse_down(x, y));
        b.handle_event(&InputEvent::mouse_up(x, y))
    }

    struct CountingSound(Cell<u32>);
    impl Sound for CountingSound {
        fn play(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn text_button_sizes_to_theme_minimum() {
        let b = ok_button();
        // " OK " is 32px, below the 100px minimum.
        assert_eq!(b.rect(), Rect::new(10.0, 10.0, 100.0, 40.0));

        let wide = Button::text((0.0, 0.0), "A much longer label")
            .font(FixedAdvance::new(8.0, 16.0));
        assert_eq!(wide.rect().w, 21.0 * 8.0);

        let fixed = ok_button().width(60.0).height(30.0);
        assert_eq!(fixed.rect().size(), Size::new(60.0, 30.0));
    }

    #[test]
    fn click_invokes_callback_once_with_nickname() {
        init_logs();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let s = seen.clone();
        let sound = Rc::new(CountingSound(Cell::new(0)));
        let mut b = ok_button()
            .nickname("ok")
            .sound(sound.clone())
            .on_click(move |n| s.borrow_mut().push(n.to_string()));

        assert!(click_at(&mut b, 20.0, 20.0));
        assert_eq!(*seen.borrow(), vec!["ok".to_string()]);
        assert_eq!(sound.0.get(), 1);
    }

    #[test]
    fn disabled_or_hidden_buttons_ignore_events() {
        let mut b = ok_button();
        b.disable();
        assert!(!click_at(&mut b, 20.0, 20.0));
        assert_eq!(b.state(), ClickState::Idle);

        b.enable();
        b.hide();
        assert!(!click_at(&mut b, 20.0, 20.0));
    }

    #[test]
    fn enter_activates_without_touching_pointer_state() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut b = ok_button()
            .enter_to_activate()
            .on_click(move |_| c.set(c.get() + 1));
        b.handle_event(&InputEvent::mouse_move(20.0, 20.0));
        assert_eq!(b.state(), ClickState::Over);

        assert!(b.handle_event(&InputEvent::key_down(Key::Enter)));
        assert_eq!(b.state(), ClickState::Over);
        assert!(!b.handle_event(&InputEvent::key_up(Key::Enter)));
        assert!(!b.handle_event(&InputEvent::key_down(Key::Tab)));
        assert_eq!(count.get(), 1);

        let plain = &mut ok_button();
        assert!(!plain.handle_event(&InputEvent::key_down(Key::Enter)));
    }

    #[test]
    fn draw_reflects_state() {
        let t = theme();
        let mut b = ok_button();
        let fill_of = |b: &Button| {
            let mut scene = Scene::new();
            b.draw(&mut scene);
            match scene.nodes.first() {
                Some(SceneNode::Rect { color, .. }) => *color,
                other => panic!("unexpected first node {other:?}"),
            }
        };
        assert_eq!(fill_of(&b), t.button_up);
        b.handle_event(&InputEvent::mouse_move(20.0, 20.0));
        assert_eq!(fill_of(&b), t.button_over);
        b.handle_event(&InputEvent::mouse_down(20.0, 20.0));
        assert_eq!(fill_of(&b), t.button_down);
        b.disable();
        assert_eq!(fill_of(&b), t.button_disabled);

        b.hide();
        let mut scene = Scene::new();
        b.draw(&mut scene);
        assert!(scene.is_empty());
    }

    #[test]
    fn image_button_uses_up_by_default() {
        let up = ImageHandle::blank(30, 20);
        let down = ImageHandle::blank(30, 20);
        let mut b = Button::custom((0.0, 0.0), &up)
            .unwrap()
            .down_image(&down)
            .unwrap();
        assert_eq!(b.rect().size(), Size::new(30.0, 20.0));

        let drawn = |b: &Button| {
            let mut scene = Scene::new();
            b.draw(&mut scene);
            match scene.nodes.into_iter().next() {
                Some(SceneNode::Image { image, .. }) => image,
                other => panic!("unexpected node {other:?}"),
            }
        };
        b.handle_event(&InputEvent::mouse_move(5.0, 5.0));
        assert!(drawn(&b).same_image(&up));
        b.handle_event(&InputEvent::mouse_down(5.0, 5.0));
        assert!(drawn(&b).same_image(&down));
    }

    #[test]
    fn missing_image_is_an_error() {
        assert!(matches!(
            Button::custom((0.0, 0.0), "nope/up.png"),
            Err(WidgetError::ResourceNotFound { .. })
        ));
    }
}
