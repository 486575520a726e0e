//! Widgets for a host-driven frame loop.
//!
//! Every widget implements [`Widget`]: feed it each [`InputEvent`] through
//! `handle_event` (which returns `true` when the user completed something:
//! a click, a toggle, a submit, a drop) and call `draw` once per frame.
//! Time-based widgets also want `update` once per frame.
//!
//! ```rust
//! use tactile_core::*;
//! use tactile_ui::*;
//!
//! let font = FixedAdvance::new(8.0, 16.0);
//! let mut ok = Button::text((10.0, 10.0), "OK").font(font);
//! let mut name = InputText::new((10.0, 60.0), "").font(font).focused(true);
//!
//! let events = [
//!     InputEvent::key_down(Key::Character('A')),
//!     InputEvent::mouse_move(20.0, 20.0),
//!     InputEvent::mouse_down(20.0, 20.0),
//!     InputEvent::mouse_up(20.0, 20.0),
//! ];
//! let mut clicked = false;
//! for e in &events {
//!     name.handle_event(e);
//!     clicked |= ok.handle_event(e);
//! }
//! assert!(clicked);
//! assert_eq!(name.value(), "A");
//!
//! let mut scene = Scene::new();
//! name.update();
//! ok.draw(&mut scene);
//! name.draw(&mut scene);
//! assert!(!scene.is_empty());
//! ```
//!
//! [`InputEvent`]: tactile_core::InputEvent

pub mod anim;
pub mod button;
pub mod checkbox;
pub mod clickable;
pub mod display_text;
pub mod dragger;
pub mod image;
pub mod radio;
pub mod textfield;
pub mod widget;

pub use anim::{Animation, Durations, Frame, FrameSpec, SpriteSheet};
pub use button::Button;
pub use checkbox::Checkbox;
pub use clickable::{ClickMachine, ClickState, PressTracker};
pub use display_text::DisplayText;
pub use dragger::Dragger;
pub use image::{Image, ImageCollection};
pub use radio::{RadioButton, RadioGroups, RadioId};
pub use textfield::{InputText, KeyRepeat};
pub use widget::{Callback, Widget, WidgetBase};
