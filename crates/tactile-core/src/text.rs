use unicode_segmentation::UnicodeSegmentation;

/// Font metrics the widgets need for layout and caret placement.
///
/// `tactile-text` provides a shaping implementation; `FixedAdvance` is a
/// monospace stand-in for tests and bitmap fonts.
pub trait TextMeasure {
    /// Width of `text` laid out as a single line.
    fn advance(&self, text: &str) -> f32;
    fn line_height(&self) -> f32;
    fn font_size(&self) -> f32;
    /// Family name to put on text scene nodes; `None` for the default face.
    fn family(&self) -> Option<&str> {
        None
    }

    /// `(byte offset, x)` for every grapheme boundary of `text`, in order,
    /// starting with `(0, 0.0)`.
    fn caret_stops(&self, text: &str) -> Vec<(usize, f32)> {
        let mut stops = vec![(0, 0.0)];
        for (i, g) in text.grapheme_indices(true) {
            let end = i + g.len();
            stops.push((end, self.advance(&text[..end])));
        }
        stops
    }
}

/// Byte offset of the stop closest to `x`.
pub fn nearest_stop(stops: &[(usize, f32)], x: f32) -> usize {
    let mut best = (0usize, f32::INFINITY);
    for &(byte, pos) in stops {
        let d = (pos - x).abs();
        if d < best.1 {
            best = (byte, d);
        }
    }
    best.0
}

/// Every grapheme cluster is `advance` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
    pub line_height: f32,
}

impl FixedAdvance {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn advance(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn font_size(&self) -> f32 {
        self.line_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    /// Left edge of something `inner` wide placed inside `outer`.
    pub fn offset(self, outer: f32, inner: f32) -> f32 {
        match self {
            Justify::Left => 0.0,
            Justify::Center => (outer - inner) / 2.0,
            Justify::Right => outer - inner,
        }
    }
}

impl std::str::FromStr for Justify {
    type Err = crate::WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Justify::Left),
            "center" => Ok(Justify::Center),
            "right" => Ok(Justify::Right),
            other => Err(crate::WidgetError::InvalidJustification(other.to_string())),
        }
    }
}
