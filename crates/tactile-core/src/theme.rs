//! # Theming
//!
//! Widgets pick their default colors and metrics from a thread-local `Theme`
//! at construction time. Override it for a block of widget construction with
//! `with_theme`:
//!
//! ```rust
//! use tactile_core::*;
//!
//! let dark = Theme {
//!     text: Color::WHITE,
//!     input_background: Color::BLACK,
//!     ..Theme::default()
//! };
//!
//! with_theme(dark, || {
//!     assert_eq!(theme().text, Color::WHITE);
//! });
//! assert_eq!(theme().text, Color::BLACK);
//! ```
//!
//! Builder methods on individual widgets always win over the theme.

use std::cell::RefCell;

use crate::Color;

thread_local! {
    static THEME_STACK: RefCell<Vec<Theme>> = const { RefCell::new(Vec::new()) };
}

/// Default colors and metrics used by the stock widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Foreground for labels and input text.
    pub text: Color,
    /// Text drawn on disabled widgets.
    pub disabled_text: Color,
    /// Outlines around buttons, boxes and circles.
    pub edge: Color,
    /// Bevel highlight on the top/left edge of buttons.
    pub highlight: Color,
    /// Bevel shadow on the bottom/right edge of buttons.
    pub shadow: Color,
    /// Inner bevel shadow.
    pub bevel: Color,

    pub button_up: Color,
    pub button_over: Color,
    pub button_down: Color,
    pub button_disabled: Color,

    /// Fill of a checkbox or radio circle.
    pub inside: Color,
    /// Fill while pressed.
    pub inside_down: Color,

    pub input_background: Color,
    /// Focus ring around an input field.
    pub focus: Color,

    pub font_size: f32,
    pub button_height: f32,
    pub button_min_width: f32,
    pub checkbox_size: f32,
    pub radio_diameter: f32,
    /// Distance from the left edge of a radio button to its label.
    pub radio_text_offset: f32,
    pub input_width: f32,
    /// How far the focus ring sits outside an input field.
    pub focus_inset: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            disabled_text: Color::DISABLED_GRAY,
            edge: Color::BLACK,
            highlight: Color::WHITE,
            shadow: Color::DARK_GRAY,
            bevel: Color::GRAY,

            button_up: Color::NORMAL_GRAY,
            button_over: Color::OVER_GRAY,
            button_down: Color::DOWN_GRAY,
            button_disabled: Color::DISABLED_GRAY,

            inside: Color::WHITE,
            inside_down: Color::OVER_GRAY,

            input_background: Color::WHITE,
            focus: Color::BLACK,

            font_size: 20.0,
            button_height: 40.0,
            button_min_width: 100.0,
            checkbox_size: 16.0,
            radio_diameter: 20.0,
            radio_text_offset: 30.0,
            input_width: 200.0,
            focus_inset: 3.0,
        }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    // Pops on unwind too.
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            THEME_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    THEME_STACK.with(|st| st.borrow_mut().push(theme));
    let _guard = Guard;
    f()
}

pub fn theme() -> Theme {
    THEME_STACK.with(|st| st.borrow().last().copied().unwrap_or_default())
}
