use egui::Color32;

use crate::surface::{Point, Surface};

/// Cursor-following shape drawn on top of everything else.
///
/// Rebuilt on every pointer move; it has no identity between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Pen tip sized to the current thickness.
    Dot {
        center: Point,
        radius: f32,
        color: Color32,
    },
    /// The selected sticker glyph.
    Glyph {
        origin: Point,
        glyph: String,
        color: Color32,
    },
}

impl Preview {
    pub fn position(&self) -> Point {
        match self {
            Preview::Dot { center, .. } => *center,
            Preview::Glyph { origin, .. } => *origin,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Preview::Dot {
                center,
                radius,
                color,
            } => surface.fill_circle(*center, *radius, *color),
            Preview::Glyph {
                origin,
                glyph,
                color,
            } => surface.draw_glyph(*origin, glyph, *color),
        }
    }
}
