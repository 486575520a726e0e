use crate::images::{ImageHandle, ImageTransform};
use crate::{Color, Rect, Vec2};

/// Display list built by widgets' `draw` calls for one frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// A single line of text with its top-left at `rect`'s origin.
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
        family: Option<String>,
    },
    /// `rect` is the destination after `transform` has been applied.
    Image {
        image: ImageHandle,
        rect: Rect,
        transform: ImageTransform,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(SceneNode::Rect {
            rect,
            color,
            radius: 0.0,
        });
    }

    pub fn border(&mut self, rect: Rect, color: Color, width: f32) {
        self.push(SceneNode::Border {
            rect,
            color,
            width,
            radius: 0.0,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.push(SceneNode::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn image(&mut self, image: &ImageHandle, at: Vec2) {
        self.push(SceneNode::Image {
            image: image.clone(),
            rect: Rect::from_origin_size(at, image.size()),
            transform: ImageTransform::IDENTITY,
        });
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hands the finished frame to a backend.
    pub fn present(&self, backend: &mut dyn crate::RenderBackend) {
        backend.frame(self);
    }
}
