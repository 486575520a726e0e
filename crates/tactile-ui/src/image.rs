use std::collections::HashMap;
use std::path::Path;

use tactile_core::error::Result;
use tactile_core::*;

use crate::widget::{Widget, WidgetBase};

/// A static picture with rotation, scaling and flips.
///
/// The transform is always applied to the image as loaded, so repeated
/// rotations or scalings never degrade it.
pub struct Image {
    base: WidgetBase,
    original: Option<ImageHandle>,
    transform: ImageTransform,
    scale_from_center: bool,
    focus: bool,
}

impl Image {
    pub fn new(loc: impl Into<Vec2>, src: impl Into<ImageSource>) -> Result<Self> {
        let original = src.into().resolve()?;
        Ok(Self::from_handle(loc.into(), original))
    }

    fn from_handle(loc: Vec2, original: Option<ImageHandle>) -> Self {
        Self {
            base: WidgetBase::new(loc, original.as_ref().map_or(Size::ZERO, |i| i.size())),
            original,
            transform: ImageTransform::IDENTITY,
            scale_from_center: true,
            focus: false,
        }
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self
    }

    /// Shows a different image with the current rotation, scale and flips.
    /// An empty source shows nothing.
    pub fn replace(&mut self, src: impl Into<ImageSource>) -> Result<()> {
        let original = src.into().resolve()?;
        self.set_original(original);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.set_original(None);
    }

    fn set_original(&mut self, original: Option<ImageHandle>) {
        self.original = original;
        let base_size = self.original_size();
        self.base.set_size(base_size);
        self.apply(self.transform, self.scale_from_center);
    }

    fn original_size(&self) -> Size {
        self.original.as_ref().map_or(Size::ZERO, |i| i.size())
    }

    /// Clockwise degrees on top of the current angle.
    pub fn rotate(&mut self, degrees: f32) {
        let t = ImageTransform {
            angle: self.transform.angle + degrees,
            ..self.transform
        };
        self.apply(t, self.scale_from_center);
    }

    pub fn rotate_to(&mut self, angle: f32) {
        let t = ImageTransform {
            angle,
            ..self.transform
        };
        self.apply(t, self.scale_from_center);
    }

    /// Percent of the loaded size. Scaling from center keeps the current
    /// center; otherwise the top-left corner stays put.
    pub fn scale(&mut self, percent: f32, from_center: bool) {
        let t = ImageTransform {
            scale_percent: percent,
            ..self.transform
        };
        self.apply(t, from_center);
    }

    pub fn flip_horizontal(&mut self) {
        let t = ImageTransform {
            flip_h: !self.transform.flip_h,
            ..self.transform
        };
        self.apply(t, self.scale_from_center);
    }

    pub fn flip_vertical(&mut self) {
        let t = ImageTransform {
            flip_v: !self.transform.flip_v,
            ..self.transform
        };
        self.apply(t, self.scale_from_center);
    }

    fn apply(&mut self, mut t: ImageTransform, from_center: bool) {
        t.angle = t.angle.rem_euclid(360.0);
        self.transform = t;
        self.scale_from_center = from_center;

        let prev = self.base.rect;
        let size = t.output_size(self.original_size());
        let rect = Rect::from_origin_size(prev.origin(), size);
        let rect = if from_center {
            rect.with_center(prev.center())
        } else {
            rect
        };
        self.base.set_loc(rect.origin());
        self.base.set_size(size);
    }

    pub fn angle(&self) -> f32 {
        self.transform.angle
    }

    /// Size as drawn.
    pub fn size(&self) -> Size {
        self.base.rect.size()
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub fn original(&self) -> Option<&ImageHandle> {
        self.original.as_ref()
    }
}

impl Widget for Image {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    /// `true` on a press that lands on the image; any other press clears
    /// focus.
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        let Some(p) = event.as_pointer() else {
            return false;
        };
        if !p.is_down() {
            return false;
        }
        self.focus = self.base.is_live() && self.base.rect.contains(p.position);
        self.focus
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        if let Some(img) = &self.original {
            scene.push(SceneNode::Image {
                image: img.clone(),
                rect: self.base.rect,
                transform: self.transform,
            });
        }
    }
}

/// Shows one image picked by key from a fixed set.
///
/// The key `""` is always present and shows nothing.
pub struct ImageCollection {
    image: Image,
    images: HashMap<String, Option<ImageHandle>>,
    current_key: String,
}

impl ImageCollection {
    pub fn new<K, S>(
        loc: impl Into<Vec2>,
        images: impl IntoIterator<Item = (K, S)>,
        start_key: &str,
    ) -> Result<Self>
    where
        K: Into<String>,
        S: Into<ImageSource>,
    {
        Self::with_prefix(loc, "", images, start_key)
    }

    /// `prefix` is joined in front of every path source.
    pub fn with_prefix<K, S>(
        loc: impl Into<Vec2>,
        prefix: impl AsRef<Path>,
        images: impl IntoIterator<Item = (K, S)>,
        start_key: &str,
    ) -> Result<Self>
    where
        K: Into<String>,
        S: Into<ImageSource>,
    {
        let prefix = prefix.as_ref();
        let mut map = HashMap::new();
        for (key, src) in images {
            let handle = src.into().resolve_with_prefix(prefix)?;
            map.insert(key.into(), handle);
        }
        map.insert(String::new(), None);

        let Some(start) = map.get(start_key) else {
            return Err(WidgetError::KeyNotFound(start_key.to_string()));
        };
        let image = Image::from_handle(loc.into(), start.clone());
        log::debug!("image collection with {} images, showing `{start_key}`", map.len());
        Ok(Self {
            image,
            images: map,
            current_key: start_key.to_string(),
        })
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.image.base.nickname = name.into();
        self
    }

    /// Switches to the image under `key`, keeping the current transform.
    /// An unknown key leaves the collection untouched.
    pub fn replace(&mut self, key: &str) -> Result<()> {
        let Some(handle) = self.images.get(key) else {
            return Err(WidgetError::KeyNotFound(key.to_string()));
        };
        let handle = handle.clone();
        self.image.set_original(handle);
        self.current_key = key.to_string();
        Ok(())
    }

    pub fn current_key(&self) -> &str {
        &self.current_key
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// The image being shown, for transforms and focus queries.
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }
}

impl Widget for ImageCollection {
    fn base(&self) -> &WidgetBase {
        &self.image.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.image.base
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.image.handle_event(event)
    }

    fn draw(&self, scene: &mut Scene) {
        self.image.draw(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pic(w: u32, h: u32) -> Image {
        Image::new((100.0, 100.0), ImageHandle::blank(w, h)).unwrap()
    }

    #[test]
    fn rotation_wraps_and_keeps_center() {
        let mut i = pic(40, 20);
        let center = i.rect().center();
        i.rotate(90.0);
        assert_eq!(i.size(), Size::new(20.0, 40.0));
        assert_eq!(i.rect().center(), center);
        i.rotate(300.0);
        assert_eq!(i.angle(), 30.0);
        i.rotate_to(-90.0);
        assert_eq!(i.angle(), 270.0);
    }

    #[test]
    fn scale_from_corner_or_center() {
        let mut i = pic(40, 20);
        i.scale(50.0, false);
        assert_eq!(i.rect(), Rect::new(100.0, 100.0, 20.0, 10.0));
        i.scale(100.0, true);
        // Center of (100, 100, 20, 10) is (110, 105).
        assert_eq!(i.rect(), Rect::new(90.0, 95.0, 40.0, 20.0));
    }

    #[test]
    fn flips_toggle() {
        let mut i = pic(10, 10);
        i.flip_horizontal();
        i.flip_vertical();
        i.flip_horizontal();
        let t = i.transform();
        assert!(!t.flip_h && t.flip_v);
        assert_eq!(i.size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn press_sets_focus() {
        let mut i = pic(10, 10);
        assert!(i.handle_event(&InputEvent::mouse_down(105.0, 105.0)));
        assert!(i.has_focus());
        assert!(!i.handle_event(&InputEvent::mouse_up(105.0, 105.0)));
        assert!(i.has_focus());
        assert!(!i.handle_event(&InputEvent::mouse_down(5.0, 5.0)));
        assert!(!i.has_focus());
        i.hide();
        assert!(!i.handle_event(&InputEvent::mouse_down(105.0, 105.0)));
    }

    #[test]
    fn clear_draws_nothing() {
        let mut i = pic(10, 10);
        i.clear();
        assert_eq!(i.size(), Size::ZERO);
        let mut scene = Scene::new();
        i.draw(&mut scene);
        assert!(scene.is_empty());
    }

    #[test]
    fn replace_keeps_transform() {
        let mut i = pic(40, 20);
        i.rotate(90.0);
        i.replace(ImageHandle::blank(60, 10)).unwrap();
        assert_eq!(i.angle(), 90.0);
        assert_eq!(i.size(), Size::new(10.0, 60.0));
    }

    fn collection() -> (ImageCollection, ImageHandle, ImageHandle) {
        let a = ImageHandle::blank(10, 10);
        let b = ImageHandle::blank(30, 20);
        let c = ImageCollection::new((0.0, 0.0), [("a", &a), ("b", &b)], "a").unwrap();
        (c, a, b)
    }

    fn shown(c: &ImageCollection) -> Option<ImageHandle> {
        let mut scene = Scene::new();
        c.draw(&mut scene);
        scene.nodes.into_iter().find_map(|n| match n {
            SceneNode::Image { image, .. } => Some(image),
            _ => None,
        })
    }

    #[test]
    fn collection_switches_images() {
        let (mut c, a, b) = collection();
        assert_eq!(c.current_key(), "a");
        assert!(shown(&c).is_some_and(|i| i.same_image(&a)));
        c.replace("b").unwrap();
        assert_eq!(c.current_key(), "b");
        assert!(shown(&c).is_some_and(|i| i.same_image(&b)));
        assert_eq!(c.rect().size(), Size::new(30.0, 20.0));
        c.replace("").unwrap();
        assert!(shown(&c).is_none());
    }

    #[test]
    fn unknown_key_leaves_collection_alone() {
        let (mut c, a, _) = collection();
        let err = c.replace("zzz").unwrap_err();
        assert!(matches!(err, WidgetError::KeyNotFound(ref k) if k == "zzz"));
        assert_eq!(c.current_key(), "a");
        assert!(shown(&c).is_some_and(|i| i.same_image(&a)));
    }

    #[test]
    fn unknown_start_key_is_rejected() {
        let a = ImageHandle::blank(10, 10);
        let err = ImageCollection::new((0.0, 0.0), [("a", &a)], "b").err().unwrap();
        assert!(matches!(err, WidgetError::KeyNotFound(_)));
    }

    #[test]
    fn collection_transform_survives_replace() {
        let (mut c, _, _) = collection();
        c.image_mut().rotate(90.0);
        c.replace("b").unwrap();
        assert_eq!(c.image().angle(), 90.0);
        assert_eq!(c.rect().size(), Size::new(20.0, 30.0));
    }

    #[test]
    fn missing_file_with_prefix_fails() {
        let err = ImageCollection::with_prefix((0.0, 0.0), "no/such/dir", [("a", "x.png")], "a")
            .err()
            .unwrap();
        assert!(matches!(err, WidgetError::ResourceNotFound { .. }));
    }
}
