use egui::{Color32, Painter, Rect, Shape, Vec2};

use crate::drawable::Drawable;
use crate::preview::Preview;
use crate::surface::{ShapeSurface, Surface};

/// Read-only view of what is on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub drawables: &'a [Drawable],
    pub preview: Option<&'a Preview>,
}

/// Receives a call after every change to the drawing.
///
/// The editor does not know what the observer does with the scene, only that
/// it must be told.
pub trait DrawingObserver {
    fn drawing_changed(&mut self, scene: Scene<'_>);
}

impl<F> DrawingObserver for F
where
    F: FnMut(Scene<'_>),
{
    fn drawing_changed(&mut self, scene: Scene<'_>) {
        self(scene)
    }
}

/// Draw every drawable in order, oldest first.
pub fn draw_drawables(surface: &mut dyn Surface, drawables: &[Drawable]) {
    for drawable in drawables {
        drawable.render(surface);
    }
}

/// Full repaint: clear, drawables in chronological order, preview on top.
pub fn redraw(surface: &mut dyn Surface, scene: Scene<'_>) {
    surface.clear_all();
    draw_drawables(surface, scene.drawables);
    if let Some(preview) = scene.preview {
        preview.render(surface);
    }
}

/// The on-screen subscriber: repaints into cached egui shapes.
#[derive(Debug)]
pub struct Renderer {
    ctx: egui::Context,
    canvas_size: Vec2,
    background: Color32,
    glyph_size: f32,
    shapes: Vec<Shape>,
}

impl Renderer {
    pub fn new(ctx: egui::Context, background: Color32, glyph_size: f32) -> Self {
        Self {
            ctx,
            canvas_size: Vec2::ZERO,
            background,
            glyph_size,
            shapes: Vec::new(),
        }
    }

    /// Record the canvas size. Returns true when it changed, in which case
    /// the cached shapes no longer cover the canvas and a redraw is due.
    pub fn set_canvas_size(&mut self, size: Vec2) -> bool {
        if self.canvas_size == size {
            return false;
        }
        self.canvas_size = size;
        true
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Paint the cached shapes into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let offset = rect.min.to_vec2();
        let painter = painter.with_clip_rect(rect);
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
    }
}

impl DrawingObserver for Renderer {
    fn drawing_changed(&mut self, scene: Scene<'_>) {
        let mut surface =
            ShapeSurface::new(&self.ctx, self.canvas_size, self.background, self.glyph_size);
        redraw(&mut surface, scene);
        self.shapes = surface.into_shapes();
        self.ctx.request_repaint();
    }
}
