use crate::scene::Scene;

/// Host side of drawing: turns a `Scene` into pixels.
pub trait RenderBackend {
    fn configure_surface(&mut self, width: u32, height: u32);
    fn frame(&mut self, scene: &Scene);
}
