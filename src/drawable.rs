use egui::Color32;

use crate::surface::{Point, Surface};

/// Freehand pen line.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    thickness: f32,
    color: Color32,
}

impl Stroke {
    /// Start a stroke at `start`.
    pub fn new(start: Point, thickness: f32, color: Color32) -> Self {
        Self {
            points: vec![start],
            thickness,
            color,
        }
    }

    /// Append a point. Strokes accept every sample.
    pub fn drag(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// A stroke needs two points before it leaves a mark.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.is_degenerate() {
            return;
        }
        surface.stroke_polyline(&self.points, self.thickness, self.color);
    }
}

/// A glyph stamped repeatedly along a pointer path.
#[derive(Debug, Clone, PartialEq)]
pub struct StampTrail {
    glyph: String,
    points: Vec<Point>,
    spacing: f32,
    color: Color32,
}

impl StampTrail {
    pub fn new(glyph: impl Into<String>, start: Point, spacing: f32, color: Color32) -> Self {
        Self {
            glyph: glyph.into(),
            points: vec![start],
            spacing,
            color,
        }
    }

    /// Append `point` if it is far enough from the last accepted point on
    /// either axis. Returns whether the point was kept.
    pub fn add_position(&mut self, point: Point) -> bool {
        let accept = match self.points.last() {
            Some(last) => {
                (point.x - last.x).abs() > self.spacing || (point.y - last.y).abs() > self.spacing
            }
            None => true,
        };
        if accept {
            self.points.push(point);
        }
        accept
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for point in &self.points {
            surface.draw_glyph(*point, &self.glyph, self.color);
        }
    }
}

/// Everything a gesture can leave on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    StampTrail(StampTrail),
}

impl Drawable {
    /// Feed a pointer sample to the drawable. Returns whether it grew.
    pub fn extend(&mut self, point: Point) -> bool {
        match self {
            Drawable::Stroke(stroke) => {
                stroke.drag(point);
                true
            }
            Drawable::StampTrail(trail) => trail.add_position(point),
        }
    }

    pub fn points(&self) -> &[Point] {
        match self {
            Drawable::Stroke(stroke) => stroke.points(),
            Drawable::StampTrail(trail) => trail.points(),
        }
    }

    /// True for drawables that would render nothing. Only strokes can be.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Drawable::Stroke(stroke) => stroke.is_degenerate(),
            Drawable::StampTrail(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Stroke(_) => "stroke",
            Drawable::StampTrail(_) => "stamp trail",
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Drawable::Stroke(stroke) => stroke.render(surface),
            Drawable::StampTrail(trail) => trail.render(surface),
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Drawable::Stroke(stroke)
    }
}

impl From<StampTrail> for Drawable {
    fn from(trail: StampTrail) -> Self {
        Drawable::StampTrail(trail)
    }
}
