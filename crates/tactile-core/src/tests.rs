#[cfg(test)]
mod tests {
    use crate::Color;
    use crate::Rect;
    use crate::Vec2;
    use crate::input::*;
    use crate::scene::*;
    use crate::text::*;
    use crate::theme::*;
    use crate::{RenderBackend, WidgetError};

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(rect.contains(Vec2 { x: 10.0, y: 10.0 }));
        assert!(!rect.contains(Vec2 { x: 110.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap.
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_center_roundtrip() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        let moved = r.with_center(Vec2::new(100.0, 100.0));
        assert_eq!(moved.center(), Vec2::new(100.0, 100.0));
        assert_eq!(moved.origin(), Vec2::new(80.0, 90.0));
    }

    #[test]
    fn test_key_consumption_is_shared_by_reference() {
        let ev = InputEvent::key_down(Key::Tab);
        let k = ev.as_key().unwrap();
        assert!(!k.is_consumed());
        k.consume();
        assert!(ev.as_key().unwrap().is_consumed());
    }

    #[test]
    fn test_pointer_helpers() {
        let down = InputEvent::mouse_down(1.0, 2.0);
        let p = down.as_pointer().unwrap();
        assert!(p.is_down());
        assert!(p.buttons.contains(PointerButtons::PRIMARY));

        let mv = InputEvent::mouse_move(1.0, 2.0);
        assert!(mv.as_pointer().unwrap().buttons.is_empty());
    }

    #[test]
    fn test_justify_parsing() {
        assert_eq!("center".parse::<Justify>().unwrap(), Justify::Center);
        let err = "middle".parse::<Justify>().unwrap_err();
        assert!(matches!(err, WidgetError::InvalidJustification(s) if s == "middle"));
    }

    #[test]
    fn test_fixed_advance_counts_graphemes() {
        let m = FixedAdvance::new(10.0, 20.0);
        assert_eq!(m.advance("abc"), 30.0);
        assert_eq!(m.advance("e\u{301}"), 10.0);
    }

    #[test]
    fn test_caret_stops_and_nearest() {
        let m = FixedAdvance::new(10.0, 20.0);
        let stops = m.caret_stops("ab");
        assert_eq!(stops, vec![(0, 0.0), (1, 10.0), (2, 20.0)]);
        assert_eq!(nearest_stop(&stops, 4.0), 0);
        assert_eq!(nearest_stop(&stops, 6.0), 1);
        assert_eq!(nearest_stop(&stops, 100.0), 2);
    }

    #[test]
    fn test_theme_override_is_scoped() {
        let custom = Theme {
            button_height: 55.0,
            ..Theme::default()
        };
        with_theme(custom, || {
            assert_eq!(theme().button_height, 55.0);
            with_theme(Theme::default(), || assert_eq!(theme().button_height, 40.0));
            assert_eq!(theme().button_height, 55.0);
        });
        assert_eq!(theme().button_height, 40.0);
    }

    #[derive(Default)]
    struct CountingBackend {
        frames: usize,
        last_nodes: usize,
    }

    impl RenderBackend for CountingBackend {
        fn configure_surface(&mut self, _width: u32, _height: u32) {}
        fn frame(&mut self, scene: &Scene) {
            self.frames += 1;
            self.last_nodes = scene.nodes.len();
        }
    }

    #[test]
    fn test_scene_present() {
        init_logs();
        let mut scene = Scene::new();
        scene.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        scene.border(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK, 1.0);

        let mut backend = CountingBackend::default();
        scene.present(&mut backend);
        assert_eq!(backend.frames, 1);
        assert_eq!(backend.last_nodes, 2);
    }
}
