use std::rc::Rc;

use tactile_core::error::Result;
use tactile_core::*;
use tactile_text::Font;

use crate::button::resolve_or_blank;
use crate::clickable::PressTracker;
use crate::widget::{Callback, Widget, WidgetBase};

/// The six looks of a two-state toggle.
#[derive(Clone, Debug)]
pub(crate) struct ToggleImages {
    pub on: ImageHandle,
    pub off: ImageHandle,
    pub on_down: ImageHandle,
    pub off_down: ImageHandle,
    pub on_disabled: ImageHandle,
    pub off_disabled: ImageHandle,
}

impl ToggleImages {
    pub fn new(on: ImageHandle, off: ImageHandle) -> Self {
        Self {
            on_down: on.clone(),
            off_down: off.clone(),
            on_disabled: on.clone(),
            off_disabled: off.clone(),
            on,
            off,
        }
    }

    pub fn pick(&self, value: bool, enabled: bool, pressed: bool) -> &ImageHandle {
        match (enabled, pressed, value) {
            (false, _, true) => &self.on_disabled,
            (false, _, false) => &self.off_disabled,
            (true, true, true) => &self.on_down,
            (true, true, false) => &self.off_down,
            (true, false, true) => &self.on,
            (true, false, false) => &self.off,
        }
    }
}

struct TextLook {
    label: String,
    font: Rc<dyn TextMeasure>,
    box_size: f32,
    edge: Color,
    inside: Color,
    inside_down: Color,
    text_color: Color,
}

enum CheckLook {
    Text(TextLook),
    Images(ToggleImages),
}

/// A two-state toggle.
pub struct Checkbox {
    base: WidgetBase,
    tracker: PressTracker,
    value: bool,
    look: CheckLook,
    sound: Option<SoundHandle>,
    on_click: Option<Callback>,
}

impl Checkbox {
    /// A drawn box with a label to its right; starts checked.
    pub fn text(loc: impl Into<Vec2>, label: impl Into<String>) -> Self {
        let t = theme();
        let label = label.into();
        let mut c = Self {
            base: WidgetBase::new(loc.into(), Size::ZERO),
            tracker: PressTracker::new(),
            value: true,
            look: CheckLook::Text(TextLook {
                label: label.clone(),
                font: Rc::new(Font::system(t.font_size)),
                box_size: t.checkbox_size,
                edge: t.edge,
                inside: t.inside,
                inside_down: t.inside_down,
                text_color: t.text,
            }),
            sound: None,
            on_click: None,
        };
        c.base.nickname = label;
        c.relayout();
        c
    }

    /// Image skinned; starts unchecked.
    pub fn custom(
        loc: impl Into<Vec2>,
        on: impl Into<ImageSource>,
        off: impl Into<ImageSource>,
    ) -> Result<Self> {
        let images = ToggleImages::new(resolve_or_blank(on.into())?, resolve_or_blank(off.into())?);
        Ok(Self {
            base: WidgetBase::new(loc.into(), images.on.size()),
            tracker: PressTracker::new(),
            value: false,
            look: CheckLook::Images(images),
            sound: None,
            on_click: None,
        })
    }

    pub fn checked(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    /// Called after the value has flipped.
    pub fn on_click(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn sound(mut self, sound: SoundHandle) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn font(mut self, measure: impl TextMeasure + 'static) -> Self {
        if let CheckLook::Text(look) = &mut self.look {
            look.font = Rc::new(measure);
        }
        self.relayout();
        self
    }

    pub fn box_size(mut self, size: f32) -> Self {
        if let CheckLook::Text(look) = &mut self.look {
            look.box_size = size;
        }
        self.relayout();
        self
    }

    pub fn colors(mut self, edge: Color, inside: Color, inside_down: Color, text: Color) -> Self {
        if let CheckLook::Text(look) = &mut self.look {
            look.edge = edge;
            look.inside = inside;
            look.inside_down = inside_down;
            look.text_color = text;
        }
        self
    }

    pub fn images(
        mut self,
        on_down: Option<ImageSource>,
        off_down: Option<ImageSource>,
        on_disabled: Option<ImageSource>,
        off_disabled: Option<ImageSource>,
    ) -> Result<Self> {
        if let CheckLook::Images(imgs) = &mut self.look {
            override_image(&mut imgs.on_down, on_down)?;
            override_image(&mut imgs.off_down, off_down)?;
            override_image(&mut imgs.on_disabled, on_disabled)?;
            override_image(&mut imgs.off_disabled, off_disabled)?;
        }
        Ok(self)
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    fn relayout(&mut self) {
        if let CheckLook::Text(look) = &self.look {
            let size = if look.label.is_empty() {
                Size::new(look.box_size, look.box_size)
            } else {
                Size::new(
                    look.font.advance(&look.label) + look.box_size + 4.0,
                    look.box_size.max(look.font.line_height()),
                )
            };
            self.base.set_size(size);
        }
    }
}

pub(crate) fn override_image(slot: &mut ImageHandle, src: Option<ImageSource>) -> Result<()> {
    if let Some(src) = src {
        if let Some(img) = src.resolve()? {
            *slot = img;
        }
    }
    Ok(())
}

impl Widget for Checkbox {
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
        let Some(p) = event.as_pointer() else {
            return false;
        };
        if !self.tracker.handle(&self.base.rect, p) {
            return false;
        }
        self.value = !self.value;
        log::debug!("checkbox `{}` -> {}", self.base.nickname, self.value);
        if let Some(s) = &self.sound {
            s.play();
        }
        if let Some(cb) = &self.on_click {
            cb(&self.base.nickname);
        }
        true
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        let enabled = self.base.enabled;
        let pressed = self.tracker.shows_pressed();
        match &self.look {
            CheckLook::Images(imgs) => {
                scene.image(imgs.pick(self.value, enabled, pressed), self.base.loc);
            }
            CheckLook::Text(look) => {
                let t = theme();
                let loc = self.base.loc;
                let s = look.box_size;
                let bx = Rect::new(loc.x, loc.y, s, s);
                let (fill, edge) = match (enabled, pressed) {
                    (false, _) => (t.disabled_text, t.disabled_text),
                    (true, true) => (look.inside_down, look.edge),
                    (true, false) => (look.inside, look.edge),
                };
                scene.fill_rect(bx, fill);
                scene.border(bx, edge, 1.0);
                if self.value {
                    let mark = t.edge;
                    scene.line(loc, Vec2::new(loc.x + s - 2.0, loc.y + s - 1.0), mark, 2.0);
                    scene.line(
                        Vec2::new(loc.x, loc.y + s),
                        Vec2::new(loc.x + s - 2.0, loc.y),
                        mark,
                        2.0,
                    );
                }
                if !look.label.is_empty() {
                    let w = look.font.advance(&look.label);
                    scene.push(SceneNode::Text {
                        rect: Rect::new(loc.x + s + 4.0, loc.y, w, look.font.line_height()),
                        text: look.label.clone(),
                        color: if enabled {
                            look.text_color
                        } else {
                            t.disabled_text
                        },
                        size: look.font.font_size(),
                        family: look.font.family().map(str::to_string),
                    });
                }
            }
        }
    }
}
