pub use crate::animation::{Clock, FrameClock, ManualClock, PlayState, SystemClock};
pub use crate::color::Color;
pub use crate::error::WidgetError;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::images::{ImageHandle, ImageSource, ImageTransform};
pub use crate::input::{
    InputEvent, Key, KeyEvent, KeyState, Modifiers, PointerButton, PointerButtons, PointerEvent,
    PointerEventKind,
};
pub use crate::render_api::RenderBackend;
pub use crate::scene::{Scene, SceneNode};
pub use crate::sound::{Sound, SoundHandle};
pub use crate::text::{FixedAdvance, Justify, TextMeasure};
pub use crate::theme::{Theme, theme, with_theme};
