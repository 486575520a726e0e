//! Shared, read-only image data and the rotate → scale → flip transform.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use image::RgbaImage;

use crate::error::{Result, WidgetError};
use crate::Size;

/// A decoded image (or a region of one) that widgets can share freely.
///
/// Cloning is cheap; the pixels are reference counted and never mutated.
#[derive(Clone)]
pub struct ImageHandle {
    pixels: Rc<RgbaImage>,
    region: Region,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl ImageHandle {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| WidgetError::ResourceNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("loaded image {}", path.display());
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let region = Region {
            x: 0,
            y: 0,
            w: pixels.width(),
            h: pixels.height(),
        };
        Self {
            pixels: Rc::new(pixels),
            region,
        }
    }

    /// A blank image of the given size.
    pub fn blank(w: u32, h: u32) -> Self {
        Self::from_rgba(RgbaImage::new(w, h))
    }

    /// A view onto part of this image, sharing the same pixels.
    pub fn sub_image(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        let fits = x.checked_add(w).is_some_and(|r| r <= self.region.w)
            && y.checked_add(h).is_some_and(|b| b <= self.region.h);
        if !fits {
            return Err(WidgetError::RegionOutOfBounds {
                x,
                y,
                w,
                h,
                sheet_w: self.region.w,
                sheet_h: self.region.h,
            });
        }
        Ok(Self {
            pixels: self.pixels.clone(),
            region: Region {
                x: self.region.x + x,
                y: self.region.y + y,
                w,
                h,
            },
        })
    }

    pub fn width(&self) -> u32 {
        self.region.w
    }

    pub fn height(&self) -> u32 {
        self.region.h
    }

    pub fn size(&self) -> Size {
        Size::new(self.region.w as f32, self.region.h as f32)
    }

    /// Region of `pixels()` this handle refers to.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn same_image(&self, other: &ImageHandle) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels) && self.region == other.region
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_image(other)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("ptr", &Rc::as_ptr(&self.pixels))
            .field("region", &self.region)
            .finish()
    }
}

/// Rotation (degrees, clockwise), scale (percent of original), then flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    pub angle: f32,
    pub scale_percent: f32,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    pub const IDENTITY: ImageTransform = ImageTransform {
        angle: 0.0,
        scale_percent: 100.0,
        flip_h: false,
        flip_v: false,
    };

    /// Size of `base` after rotation (bounding box) and scaling, in whole pixels.
    pub fn output_size(&self, base: Size) -> Size {
        let (w, h) = if self.angle.rem_euclid(360.0) == 0.0 {
            (base.width, base.height)
        } else {
            let rad = self.angle.to_radians();
            let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
            (
                (base.width * cos + base.height * sin).round(),
                (base.width * sin + base.height * cos).round(),
            )
        };
        let k = self.scale_percent / 100.0;
        Size::new((w * k).trunc().max(0.0), (h * k).trunc().max(0.0))
    }
}

/// Where an image comes from when building a widget.
#[derive(Clone, Debug)]
pub enum ImageSource {
    Path(std::path::PathBuf),
    Loaded(ImageHandle),
    /// Nothing is drawn.
    Empty,
}

impl ImageSource {
    pub fn resolve(&self) -> Result<Option<ImageHandle>> {
        self.resolve_with_prefix(Path::new(""))
    }

    /// Like `resolve`, with `prefix` joined in front of path sources.
    pub fn resolve_with_prefix(&self, prefix: &Path) -> Result<Option<ImageHandle>> {
        match self {
            ImageSource::Path(p) => ImageHandle::load(prefix.join(p)).map(Some),
            ImageSource::Loaded(h) => Ok(Some(h.clone())),
            ImageSource::Empty => Ok(None),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(p: &str) -> Self {
        if p.is_empty() {
            ImageSource::Empty
        } else {
            ImageSource::Path(p.into())
        }
    }
}

impl From<&Path> for ImageSource {
    fn from(p: &Path) -> Self {
        ImageSource::Path(p.to_path_buf())
    }
}

impl From<std::path::PathBuf> for ImageSource {
    fn from(p: std::path::PathBuf) -> Self {
        ImageSource::Path(p)
    }
}

impl From<ImageHandle> for ImageSource {
    fn from(h: ImageHandle) -> Self {
        ImageSource::Loaded(h)
    }
}

impl From<&ImageHandle> for ImageSource {
    fn from(h: &ImageHandle) -> Self {
        ImageSource::Loaded(h.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_resource_error() {
        let err = ImageHandle::load("does/not/exist.png").unwrap_err();
        assert!(matches!(err, WidgetError::ResourceNotFound { .. }));
    }

    #[test]
    fn sub_image_shares_pixels() {
        let sheet = ImageHandle::blank(64, 32);
        let cell = sheet.sub_image(32, 0, 32, 32).unwrap();
        assert_eq!(cell.size(), Size::new(32.0, 32.0));
        assert_eq!(cell.region(), Region { x: 32, y: 0, w: 32, h: 32 });
        assert!(Rc::ptr_eq(&sheet.pixels, &cell.pixels));
        assert!(sheet.sub_image(40, 0, 32, 32).is_err());
    }

    #[test]
    fn transform_sizes() {
        let base = Size::new(40.0, 20.0);
        let quarter = ImageTransform {
            angle: 90.0,
            ..ImageTransform::IDENTITY
        };
        assert_eq!(quarter.output_size(base), Size::new(20.0, 40.0));

        let half = ImageTransform {
            scale_percent: 50.0,
            ..ImageTransform::IDENTITY
        };
        assert_eq!(half.output_size(base), Size::new(20.0, 10.0));

        let flipped = ImageTransform {
            flip_h: true,
            ..ImageTransform::IDENTITY
        };
        assert_eq!(flipped.output_size(base), base);
    }

    #[test]
    fn empty_path_is_empty_source() {
        assert!(matches!(ImageSource::from(""), ImageSource::Empty));
        assert!(ImageSource::Empty.resolve().unwrap().is_none());
    }
}
