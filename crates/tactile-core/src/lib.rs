//! # Events in, scenes out
//!
//! Tactile widgets sit inside a host's own frame loop. The host owns the
//! window, the event source and the renderer; this crate holds the small
//! vocabulary both sides agree on:
//!
//! - `InputEvent`: one pointer or key event, fed to every widget in turn.
//! - `Scene`: the display list that widgets append to when drawn.
//! - `Clock` / `FrameClock`: the shared notion of "now" and the frame
//!   timing engine behind flip-book animations.
//!
//! ## The loop
//!
//! ```rust
//! use tactile_core::*;
//!
//! let events = vec![InputEvent::mouse_move(10.0, 10.0)];
//! let mut scene = Scene::new();
//! for event in &events {
//!     // widget.handle_event(event) for every widget
//!     let _ = event.as_pointer();
//! }
//! // widget.draw(&mut scene) for every widget, then hand it over:
//! // scene.present(&mut backend);
//! assert!(scene.is_empty());
//! ```
//!
//! ## Timing
//!
//! Everything time-based reads a `Clock`. Programs use `SystemClock`; tests
//! drive a `ManualClock`:
//!
//! ```rust
//! use std::time::Duration;
//! use tactile_core::*;
//!
//! let clock = ManualClock::new();
//! let mut frames = FrameClock::new([Duration::from_millis(100); 3]).unwrap();
//! frames.start(clock.now());
//! clock.advance(Duration::from_millis(150));
//! frames.update(clock.now());
//! assert_eq!(frames.index(), 1);
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod images;
pub mod input;
pub mod prelude;
pub mod render_api;
pub mod scene;
pub mod sound;
pub mod tests;
pub mod text;
pub mod theme;

pub use animation::*;
pub use color::*;
pub use error::WidgetError;
pub use geometry::*;
pub use images::*;
pub use input::*;
pub use render_api::*;
pub use scene::*;
pub use sound::*;
pub use text::*;
pub use theme::*;
