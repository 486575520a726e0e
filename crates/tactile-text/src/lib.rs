//! Text measurement for tactile widgets, backed by cosmic-text.
//!
//! One shared `FontSystem` lives behind a mutex for the whole process; a
//! `Font` is only a family name plus a pixel size and borrows the engine for
//! the duration of each measurement.

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use cosmic_text::fontdb::Source;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use unicode_segmentation::UnicodeSegmentation;

use tactile_core::TextMeasure;
use tactile_core::WidgetError;
use tactile_core::error::Result;

/// Line height as a multiple of the pixel size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

struct Engine {
    fs: FontSystem,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        let fs = FontSystem::new();
        log::debug!("font system ready, {} faces", fs.db().len());
        Mutex::new(Engine { fs })
    })
}

// Shape a single line (no wrapping) and hand the laid out buffer to `f`.
fn with_layout<R>(text: &str, px: f32, family: Option<&str>, f: impl FnOnce(&Buffer) -> R) -> R {
    let mut eng = engine().lock();
    let attrs = match family {
        Some(name) => Attrs::new().family(Family::Name(name)),
        None => Attrs::new(),
    };
    let mut buf = Buffer::new(&mut eng.fs, Metrics::new(px, px * LINE_HEIGHT_FACTOR));
    {
        let mut b = buf.borrow_with(&mut eng.fs);
        b.set_size(None, None);
        b.set_text(text, &attrs, Shaping::Advanced, None);
        b.shape_until_scroll(true);
    }
    f(&buf)
}

fn family_exists(name: &str) -> bool {
    let eng = engine().lock();
    eng.fs.db().faces().any(|face| {
        face.families
            .iter()
            .any(|(family, _)| family.eq_ignore_ascii_case(name))
    })
}

// Registers a font file and returns the family name of its first face.
fn load_font_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| WidgetError::ResourceNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut eng = engine().lock();
    let db = eng.fs.db_mut();
    let ids = db.load_font_source(Source::Binary(Arc::new(bytes)));
    let family = ids
        .first()
        .and_then(|id| db.face(*id))
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    family.ok_or_else(|| WidgetError::ResourceNotFound {
        path: path.to_path_buf(),
        reason: "no usable font face in file".to_string(),
    })
}

/// A font face at a pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    family: Option<String>,
    size: f32,
}

impl Font {
    /// The default face.
    pub fn system(size: f32) -> Self {
        Self { family: None, size }
    }

    /// A system family by name, or a font file when `name` has an extension.
    ///
    /// Unknown family names fall back to the default face.
    pub fn named(name: &str, size: f32) -> Result<Self> {
        if Path::new(name).extension().is_some() {
            let family = load_font_file(Path::new(name))?;
            log::debug!("loaded font file {name} as `{family}`");
            return Ok(Self {
                family: Some(family),
                size,
            });
        }
        if family_exists(name) {
            Ok(Self {
                family: Some(name.to_string()),
                size,
            })
        } else {
            log::warn!("font family `{name}` not found, using the default face");
            Ok(Self::system(size))
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl TextMeasure for Font {
    fn advance(&self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        with_layout(text, self.size, self.family.as_deref(), |buf| {
            buf.layout_runs().map(|run| run.line_w).fold(0.0, f32::max)
        })
    }

    fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }

    fn font_size(&self) -> f32 {
        self.size
    }

    fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    // One shaping pass instead of one per prefix.
    fn caret_stops(&self, text: &str) -> Vec<(usize, f32)> {
        let mut glyph_ends = vec![(0usize, 0.0f32)];
        if !text.is_empty() {
            with_layout(text, self.size, self.family.as_deref(), |buf| {
                for run in buf.layout_runs() {
                    for g in run.glyphs {
                        glyph_ends.push((g.end, g.x + g.w));
                    }
                }
            });
        }
        glyph_ends.sort_by_key(|(byte, _)| *byte);

        // Snap to grapheme boundaries; a boundary inside a ligature takes the
        // position of the glyph that covers it.
        let mut stops = vec![(0usize, 0.0f32)];
        let mut last_x = 0.0f32;
        let mut glyphs = glyph_ends.iter().peekable();
        for (i, g) in text.grapheme_indices(true) {
            let end = i + g.len();
            while let Some(&&(byte, x)) = glyphs.peek() {
                if byte > end {
                    break;
                }
                last_x = last_x.max(x);
                glyphs.next();
            }
            stops.push((end, last_x));
        }
        stops
    }
}

/// Fonts cached by (name, size), so widgets sharing a face share one `Font`.
#[derive(Default)]
pub struct FontManager {
    cache: AHashMap<(String, u32), Font>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` selects the default face.
    pub fn load(&mut self, name: Option<&str>, size: f32) -> Result<Font> {
        let key = (
            name.map(str::to_lowercase).unwrap_or_else(|| "none".to_string()),
            size.to_bits(),
        );
        if let Some(font) = self.cache.get(&key) {
            return Ok(font.clone());
        }
        let font = match name {
            Some(name) => Font::named(name, size)?,
            None => Font::system(size),
        };
        self.cache.insert(key, font.clone());
        Ok(font)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn empty_text_has_no_width() {
        let f = Font::system(16.0);
        assert_eq!(f.advance(""), 0.0);
        assert_eq!(f.line_height(), 16.0 * LINE_HEIGHT_FACTOR);
    }

    #[test]
    fn longer_text_is_not_narrower() {
        let f = Font::system(16.0);
        assert!(f.advance("Hello world") >= f.advance("Hello"));
    }

    #[test]
    fn caret_stops_land_on_grapheme_boundaries() {
        let t = "A\u{1F44D}\u{1F3FD}B";
        let stops = Font::system(16.0).caret_stops(t);
        assert_eq!(stops.first(), Some(&(0, 0.0)));
        assert_eq!(stops.last().map(|s| s.0), Some(t.len()));
        for (byte, _) in &stops {
            assert!(t.is_char_boundary(*byte));
        }
        // Two graphemes plus the emoji cluster.
        assert_eq!(stops.len(), 4);
        assert!(stops.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn missing_font_file_is_resource_error() {
        init_logs();
        let err = Font::named("no/such/font.ttf", 12.0).unwrap_err();
        assert!(matches!(err, WidgetError::ResourceNotFound { .. }));
    }

    #[test]
    fn unknown_family_falls_back_to_default() {
        init_logs();
        let f = Font::named("Definitely Not A Real Family", 12.0).unwrap();
        assert_eq!(f.family(), None);
    }

    #[test]
    fn manager_caches_by_name_and_size() {
        let mut fm = FontManager::new();
        fm.load(None, 20.0).unwrap();
        fm.load(None, 20.0).unwrap();
        fm.load(None, 24.0).unwrap();
        assert_eq!(fm.len(), 2);
    }
}
