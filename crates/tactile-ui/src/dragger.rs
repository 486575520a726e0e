use std::rc::Rc;

use tactile_core::error::Result;
use tactile_core::*;

use crate::button::resolve_or_blank;
use crate::checkbox::override_image;
use crate::widget::{Callback, Widget, WidgetBase};

/// An image the user can pick up and move.
pub struct Dragger {
    base: WidgetBase,
    up: ImageHandle,
    over: ImageHandle,
    down: ImageHandle,
    disabled: ImageHandle,
    dragging: bool,
    mouse_over: bool,
    /// Pointer minus origin, captured on press.
    delta: Vec2,
    start_loc: Vec2,
    mouse_up_loc: Vec2,
    on_drop: Option<Callback>,
}

impl Dragger {
    pub fn new(loc: impl Into<Vec2>, up: impl Into<ImageSource>) -> Result<Self> {
        let loc = loc.into();
        let up = resolve_or_blank(up.into())?;
        Ok(Self {
            base: WidgetBase::new(loc, up.size()),
            over: up.clone(),
            down: up.clone(),
            disabled: up.clone(),
            up,
            dragging: false,
            mouse_over: false,
            delta: Vec2::ZERO,
            start_loc: loc,
            mouse_up_loc: loc,
            on_drop: None,
        })
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    pub fn images(
        mut self,
        over: Option<ImageSource>,
        down: Option<ImageSource>,
        disabled: Option<ImageSource>,
    ) -> Result<Self> {
        override_image(&mut self.over, over)?;
        override_image(&mut self.down, down)?;
        override_image(&mut self.disabled, disabled)?;
        Ok(self)
    }

    /// Called with the nickname when a drag ends.
    pub fn on_drop(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_drop = Some(Rc::new(f));
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Where the pointer was released at the end of the last drag.
    pub fn mouse_up_loc(&self) -> Vec2 {
        self.mouse_up_loc
    }

    /// Puts the dragger back where the last drag started.
    pub fn reset_to_previous_loc(&mut self) {
        let loc = self.start_loc;
        self.set_loc(loc);
    }
}

impl Widget for Dragger {
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
        let pos = p.position;
        match p.event {
            PointerEventKind::Down(_) => {
                if self.base.rect.contains(pos) {
                    self.dragging = true;
                    self.delta = pos - self.base.loc;
                    self.start_loc = self.base.loc;
                }
                false
            }
            PointerEventKind::Move => {
                if self.dragging {
                    self.set_loc(pos - self.delta);
                } else {
                    self.mouse_over = self.base.rect.contains(pos);
                }
                false
            }
            PointerEventKind::Up(_) => {
                if !self.dragging {
                    return false;
                }
                self.dragging = false;
                self.mouse_up_loc = pos;
                self.set_loc(pos - self.delta);
                log::debug!(
                    "dragger `{}` dropped at ({}, {})",
                    self.base.nickname,
                    pos.x,
                    pos.y
                );
                if let Some(cb) = &self.on_drop {
                    cb(&self.base.nickname);
                }
                true
            }
        }
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        let img = if !self.base.enabled {
            &self.disabled
        } else if self.dragging {
            &self.down
        } else if self.mouse_over {
            &self.over
        } else {
            &self.up
        };
        scene.image(img, self.base.loc);
    }
}
