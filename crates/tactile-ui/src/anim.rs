//! Flip-book animations.
//!
//! Timing lives in `FrameClock`; this module adds images, offsets and the
//! widget plumbing. Playback only advances when `update` is called, so the
//! host decides the frame rate.
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tactile_core::*;
//! use tactile_ui::Animation;
//!
//! let clock = Rc::new(ManualClock::new());
//! let ms = Duration::from_millis;
//! let frames = [(ImageHandle::blank(8, 8), ms(100)), (ImageHandle::blank(8, 8), ms(100))];
//! let mut walk = Animation::new(clock.clone(), (0.0, 0.0), frames)
//!     .unwrap()
//!     .auto_start();
//!
//! clock.advance(ms(150));
//! walk.update();
//! assert_eq!(walk.index(), 1);
//! ```

use std::rc::Rc;
use std::time::Duration;

use tactile_core::error::Result;
use tactile_core::*;

use crate::widget::{Callback, Widget, WidgetBase};

/// One frame as given to `Animation::new`.
#[derive(Clone, Debug)]
pub struct FrameSpec {
    /// `ImageSource::Empty` shows nothing for this frame.
    pub source: ImageSource,
    pub duration: Duration,
    /// Added to the animation's location when drawing this frame.
    pub offset: Vec2,
}

impl FrameSpec {
    pub fn new(source: impl Into<ImageSource>, duration: Duration) -> Self {
        Self {
            source: source.into(),
            duration,
            offset: Vec2::ZERO,
        }
    }

    pub fn offset(mut self, offset: impl Into<Vec2>) -> Self {
        self.offset = offset.into();
        self
    }
}

impl<S: Into<ImageSource>> From<(S, Duration)> for FrameSpec {
    fn from((source, duration): (S, Duration)) -> Self {
        FrameSpec::new(source, duration)
    }
}

impl<S: Into<ImageSource>, V: Into<Vec2>> From<(S, Duration, V)> for FrameSpec {
    fn from((source, duration, offset): (S, Duration, V)) -> Self {
        FrameSpec::new(source, duration).offset(offset)
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub image: Option<ImageHandle>,
    pub offset: Vec2,
}

/// Cell layout of a sprite sheet. Cells are numbered row by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub n_cols: u32,
    pub n_images: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Durations {
    Uniform(Duration),
    /// One per image.
    PerFrame(Vec<Duration>),
}

pub struct Animation {
    base: WidgetBase,
    frames: Vec<Frame>,
    timing: FrameClock,
    clock: Rc<dyn Clock>,
    /// Click target size, from the first frame that has an image.
    hit_size: Size,
    on_finish: Option<Callback>,
}

impl Animation {
    pub fn new<F: Into<FrameSpec>>(
        clock: Rc<dyn Clock>,
        loc: impl Into<Vec2>,
        frames: impl IntoIterator<Item = F>,
    ) -> Result<Self> {
        let mut loaded = Vec::new();
        let mut durations = Vec::new();
        for spec in frames {
            let spec = spec.into();
            loaded.push(Frame {
                image: spec.source.resolve()?,
                offset: spec.offset,
            });
            durations.push(spec.duration);
        }
        Self::from_frames(clock, loc.into(), loaded, durations)
    }

    /// Cuts `layout.n_images` cells out of `sheet`.
    pub fn sprite_sheet(
        clock: Rc<dyn Clock>,
        loc: impl Into<Vec2>,
        sheet: impl Into<ImageSource>,
        layout: SpriteSheet,
        durations: Durations,
    ) -> Result<Self> {
        let n = layout.n_images as usize;
        let durations = match durations {
            Durations::Uniform(d) => vec![d; n],
            Durations::PerFrame(list) if list.len() == n => list,
            Durations::PerFrame(list) => {
                return Err(WidgetError::FrameCountMismatch {
                    images: n,
                    durations: list.len(),
                });
            }
        };
        let sheet = match sheet.into() {
            ImageSource::Empty => {
                return Err(WidgetError::ResourceNotFound {
                    path: Default::default(),
                    reason: "no sprite sheet given".into(),
                });
            }
            src => src.resolve()?.unwrap_or_else(|| ImageHandle::blank(0, 0)),
        };

        let cols = layout.n_cols.max(1);
        let mut frames = Vec::with_capacity(n);
        for i in 0..layout.n_images {
            let (col, row) = (i % cols, i / cols);
            let cell = sheet.sub_image(
                col * layout.width,
                row * layout.height,
                layout.width,
                layout.height,
            )?;
            frames.push(Frame {
                image: Some(cell),
                offset: Vec2::ZERO,
            });
        }
        Self::from_frames(clock, loc.into(), frames, durations)
    }

    fn from_frames(
        clock: Rc<dyn Clock>,
        loc: Vec2,
        frames: Vec<Frame>,
        durations: Vec<Duration>,
    ) -> Result<Self> {
        let timing = FrameClock::new(durations)?;
        let hit_size = frames
            .iter()
            .find_map(|f| f.image.as_ref())
            .map_or(Size::ZERO, ImageHandle::size);
        let mut a = Self {
            base: WidgetBase::new(loc, Size::ZERO),
            frames,
            timing,
            clock,
            hit_size,
            on_finish: None,
        };
        a.sync_rect();
        Ok(a)
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.timing.set_looping(looping);
        self
    }

    /// Plays before stopping, when not looping. Zero counts as one.
    pub fn iterations(mut self, n: u32) -> Self {
        self.timing.set_iterations(n);
        self
    }

    /// Called with the nickname when the last iteration ends.
    pub fn on_finish(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_finish = Some(Rc::new(f));
        self
    }

    /// Starts playing right away.
    pub fn auto_start(mut self) -> Self {
        self.start();
        self
    }

    pub fn start(&mut self) {
        self.timing.start(self.clock.now());
        self.sync_rect();
    }

    pub fn play(&mut self) {
        self.start();
    }

    pub fn stop(&mut self) {
        self.timing.stop();
        self.sync_rect();
    }

    pub fn pause(&mut self) {
        self.timing.pause(self.clock.now());
    }

    /// Per-frame tick. `true` once, when playback finishes.
    pub fn update(&mut self) -> bool {
        let finished = self.timing.update(self.clock.now());
        self.sync_rect();
        if finished {
            log::debug!("animation `{}` finished", self.base.nickname);
            if let Some(cb) = &self.on_finish {
                cb(&self.base.nickname);
            }
        }
        finished
    }

    pub fn state(&self) -> PlayState {
        self.timing.state()
    }

    pub fn index(&self) -> usize {
        self.timing.index()
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.timing.set_looping(looping);
    }

    pub fn is_looping(&self) -> bool {
        self.timing.is_looping()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The area a press must land in to be reported by `handle_event`.
    /// Unlike `rect()`, it does not change from frame to frame.
    pub fn hit_rect(&self) -> Rect {
        Rect::from_origin_size(self.base.loc, self.hit_size)
    }

    fn current(&self) -> Option<&Frame> {
        self.frames.get(self.timing.index())
    }

    fn sync_rect(&mut self) {
        let size = self
            .current()
            .and_then(|f| f.image.as_ref())
            .map_or(Size::ZERO, |i| i.size());
        self.base.set_size(size);
    }
}

impl Widget for Animation {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    /// `true` on a press inside `hit_rect` while not playing, so the host
    /// can start it on click.
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.base.is_live() {
            return false;
        }
        let Some(p) = event.as_pointer() else {
            return false;
        };
        p.is_down()
            && self.hit_rect().contains(p.position)
            && self.timing.state() != PlayState::Playing
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        if let Some(Frame {
            image: Some(img),
            offset,
        }) = self.current()
        {
            scene.image(img, self.base.loc + *offset);
        }
    }
}
