use std::rc::Rc;

use tactile_core::*;

/// Called with the widget's nickname after a completed interaction.
pub type Callback = Rc<dyn Fn(&str)>;

/// Position, bounds and flags every widget carries.
#[derive(Clone, Debug)]
pub struct WidgetBase {
    pub loc: Vec2,
    pub rect: Rect,
    pub visible: bool,
    pub enabled: bool,
    pub nickname: String,
}

impl WidgetBase {
    pub fn new(loc: Vec2, size: Size) -> Self {
        Self {
            loc,
            rect: Rect::from_origin_size(loc, size),
            visible: true,
            enabled: true,
            nickname: String::new(),
        }
    }

    pub fn set_size(&mut self, size: Size) {
        self.rect = Rect::from_origin_size(self.loc, size);
    }

    /// Moves the widget keeping `rect` in step with `loc`.
    pub fn set_loc(&mut self, loc: Vec2) {
        self.loc = loc;
        self.rect = self.rect.with_origin(loc);
    }

    /// Visible and enabled.
    pub fn is_live(&self) -> bool {
        self.visible && self.enabled
    }
}

/// The two-call contract every widget implements, plus the shared
/// position/visibility operations.
///
/// The host feeds each event to `handle_event` (which returns `true` on a
/// completed interaction) and calls `draw` once per frame.
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    fn handle_event(&mut self, event: &InputEvent) -> bool;
    fn draw(&self, scene: &mut Scene);

    fn show(&mut self) {
        self.base_mut().visible = true;
    }
    fn hide(&mut self) {
        self.base_mut().visible = false;
    }
    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn enable(&mut self) {
        self.base_mut().enabled = true;
    }
    fn disable(&mut self) {
        self.base_mut().enabled = false;
    }
    fn is_enabled(&self) -> bool {
        self.base().enabled
    }

    fn nickname(&self) -> &str {
        &self.base().nickname
    }

    fn set_loc(&mut self, loc: Vec2) {
        self.base_mut().set_loc(loc);
    }
    fn loc(&self) -> Vec2 {
        self.base().loc
    }
    fn rect(&self) -> Rect {
        self.base().rect
    }
    fn x(&self) -> f32 {
        self.base().loc.x
    }
    fn y(&self) -> f32 {
        self.base().loc.y
    }

    fn move_x(&mut self, dx: f32) {
        self.move_xy(dx, 0.0);
    }
    fn move_y(&mut self, dy: f32) {
        self.move_xy(0.0, dy);
    }
    fn move_xy(&mut self, dx: f32, dy: f32) {
        let loc = self.loc() + Vec2::new(dx, dy);
        self.set_loc(loc);
    }

    fn overlaps_rect(&self, other: &Rect) -> bool {
        self.rect().intersects(other)
    }
    fn overlaps(&self, other: &dyn Widget) -> bool {
        self.overlaps_rect(&other.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(WidgetBase);

    impl Widget for Plain {
        fn base(&self) -> &WidgetBase {
            &self.0
        }
        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.0
        }
        fn handle_event(&mut self, _event: &InputEvent) -> bool {
            false
        }
        fn draw(&self, _scene: &mut Scene) {}
    }

    fn plain(x: f32, y: f32) -> Plain {
        Plain(WidgetBase::new(Vec2::new(x, y), Size::new(10.0, 10.0)))
    }

    #[test]
    fn rect_follows_moves() {
        let mut w = plain(0.0, 0.0);
        w.move_xy(5.0, 7.0);
        assert_eq!(w.loc(), Vec2::new(5.0, 7.0));
        assert_eq!(w.rect(), Rect::new(5.0, 7.0, 10.0, 10.0));
        w.move_x(-5.0);
        w.move_y(3.0);
        assert_eq!((w.x(), w.y()), (0.0, 10.0));
        assert_eq!(w.rect().origin(), w.loc());
    }

    #[test]
    fn flags() {
        let mut w = plain(0.0, 0.0);
        assert!(w.is_visible() && w.is_enabled());
        w.hide();
        w.disable();
        assert!(!w.is_visible() && !w.is_enabled());
        assert!(!w.base().is_live());
        w.show();
        w.enable();
        assert!(w.base().is_live());
    }

    #[test]
    fn overlap() {
        let a = plain(0.0, 0.0);
        let b = plain(5.0, 5.0);
        let c = plain(20.0, 0.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(c.overlaps_rect(&Rect::new(25.0, 5.0, 1.0, 1.0)));
    }
}
