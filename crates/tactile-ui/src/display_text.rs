use std::fmt::Display;
use std::rc::Rc;

use tactile_core::error::Result;
use tactile_core::*;
use tactile_text::Font;

use crate::widget::{Widget, WidgetBase};

/// Read-only text, one scene text run per line.
pub struct DisplayText {
    base: WidgetBase,
    text: String,
    lines: Vec<String>,
    line_widths: Vec<f32>,
    block: Size,
    font: Rc<dyn TextMeasure>,
    color: Color,
    background: Option<Color>,
    justify: Justify,
    user_width: Option<f32>,
    user_height: Option<f32>,
}

impl DisplayText {
    pub fn new(loc: impl Into<Vec2>, value: impl Display) -> Self {
        let t = theme();
        let mut d = Self {
            base: WidgetBase::new(loc.into(), Size::ZERO),
            text: value.to_string(),
            lines: Vec::new(),
            line_widths: Vec::new(),
            block: Size::ZERO,
            font: Rc::new(Font::system(t.font_size)),
            color: t.text,
            background: None,
            justify: Justify::Left,
            user_width: None,
            user_height: None,
        };
        d.relayout();
        d
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    pub fn font(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.font = Rc::new(measure);
        self.relayout();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// `"left"`, `"center"` or `"right"`.
    pub fn justified(self, how: &str) -> Result<Self> {
        let justify = how.parse()?;
        Ok(self.justify(justify))
    }

    /// Fixes the width of the area; text is justified inside it and clipped.
    pub fn width(mut self, w: f32) -> Self {
        self.user_width = Some(w);
        self.relayout();
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.user_height = Some(h);
        self.relayout();
        self
    }

    /// Returns `false` when the text was already `value`.
    pub fn set_value(&mut self, value: impl Display) -> bool {
        let text = value.to_string();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.relayout();
        true
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn uses_area(&self) -> bool {
        self.user_width.is_some() || self.user_height.is_some()
    }

    fn relayout(&mut self) {
        self.lines = self.text.split('\n').map(str::to_string).collect();
        self.line_widths = self.lines.iter().map(|l| self.font.advance(l)).collect();
        self.block = Size::new(
            self.line_widths.iter().copied().fold(0.0, f32::max),
            self.lines.len() as f32 * self.font.line_height(),
        );
        let size = Size::new(
            self.user_width.unwrap_or(self.block.width),
            self.user_height.unwrap_or(self.block.height),
        );
        self.base.set_size(size);
    }
}

impl Widget for DisplayText {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn handle_event(&mut self, _event: &InputEvent) -> bool {
        false
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        let r = self.base.rect;
        if let Some(bg) = self.background {
            scene.fill_rect(r, bg);
        }
        let clip = self.uses_area();
        if clip {
            scene.push(SceneNode::PushClip { rect: r });
        }
        let block_left = if clip {
            self.justify.offset(r.w, self.block.width)
        } else {
            0.0
        };
        let lh = self.font.line_height();
        for (i, (line, w)) in self.lines.iter().zip(&self.line_widths).enumerate() {
            let x = r.x + block_left + self.justify.offset(self.block.width, *w);
            scene.push(SceneNode::Text {
                rect: Rect::new(x, r.y + i as f32 * lh, *w, lh),
                text: line.clone(),
                color: self.color,
                size: self.font.font_size(),
                family: self.font.family().map(str::to_string),
            });
        }
        if clip {
            scene.push(SceneNode::PopClip);
        }
    }
}
