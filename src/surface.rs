use egui::{Align2, Color32, Context, FontId, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};

/// A point in canvas-local coordinates.
pub type Point = Pos2;

/// The drawing capability the core renders through.
///
/// Implementations decide what a "surface" is: egui shapes for the on-screen
/// canvas, a pixmap for export, or a plain log of calls in tests.
pub trait Surface {
    /// Logical size of the surface, before any scale transform.
    fn size(&self) -> Vec2;

    /// Clear a rectangular region.
    fn clear(&mut self, rect: Rect);

    /// Stroke one open path through `points`.
    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color32);

    /// Paint `glyph` with its baseline-left corner at `origin`.
    fn draw_glyph(&mut self, origin: Point, glyph: &str, color: Color32);

    /// Clear the whole surface.
    fn clear_all(&mut self) {
        let rect = Rect::from_min_size(Pos2::ZERO, self.size());
        self.clear(rect);
    }
}

/// On-screen surface: collects egui shapes in canvas-local coordinates.
///
/// The shapes are translated to the canvas rectangle when painted, so the
/// cached list survives panel moves.
pub struct ShapeSurface<'a> {
    ctx: &'a Context,
    size: Vec2,
    background: Color32,
    glyph_size: f32,
    shapes: Vec<Shape>,
}

impl<'a> ShapeSurface<'a> {
    pub fn new(ctx: &'a Context, size: Vec2, background: Color32, glyph_size: f32) -> Self {
        Self {
            ctx,
            size,
            background,
            glyph_size,
            shapes: Vec::new(),
        }
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl Surface for ShapeSurface<'_> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        // A clear covering the whole canvas makes everything before it invisible
        if rect.contains_rect(Rect::from_min_size(Pos2::ZERO, self.size)) {
            self.shapes.clear();
        }
        self.shapes.push(Shape::rect_filled(rect, 0.0, self.background));
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color32) {
        self.shapes
            .push(Shape::line(points.to_vec(), EguiStroke::new(width, color)));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color32) {
        self.shapes.push(Shape::circle_filled(center, radius, color));
    }

    fn draw_glyph(&mut self, origin: Point, glyph: &str, color: Color32) {
        let font_id = FontId::proportional(self.glyph_size);
        let shape = self.ctx.fonts(|fonts| {
            Shape::text(fonts, origin, Align2::LEFT_BOTTOM, glyph, font_id, color)
        });
        self.shapes.push(shape);
    }
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear(Rect),
    Polyline {
        points: Vec<Point>,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color32,
    },
    Glyph {
        origin: Point,
        glyph: String,
        color: Color32,
    },
}

/// Surface that only remembers what was asked of it.
///
/// Test tooling: lets observers in tests assert on draw calls without a
/// window or a pixel buffer.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Everything recorded after the most recent full clear.
    pub fn visible_ops(&self) -> &[SurfaceOp] {
        let full = Rect::from_min_size(Pos2::ZERO, self.size);
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear(rect) if rect.contains_rect(full)))
            .map_or(0, |index| index + 1);
        &self.ops[start..]
    }

    /// Number of straight line segments across all recorded polylines.
    pub fn segment_count(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                SurfaceOp::Polyline { points, .. } => points.len().saturating_sub(1),
                _ => 0,
            })
            .sum()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::Clear(rect));
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color32) {
        self.ops.push(SurfaceOp::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color32) {
        self.ops.push(SurfaceOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_glyph(&mut self, origin: Point, glyph: &str, color: Color32) {
        self.ops.push(SurfaceOp::Glyph {
            origin,
            glyph: glyph.to_owned(),
            color,
        });
    }
}
