use egui::Color32;
use rand::Rng;

use crate::config::SketchConfig;
use crate::drawable::{Drawable, StampTrail, Stroke};
use crate::preview::Preview;
use crate::surface::Point;

/// Color of the pen-tip preview and of stamped glyphs.
pub const PREVIEW_COLOR: Color32 = Color32::WHITE;

/// Pen thickness presets offered by the tool panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pen {
    Thin,
    Thick,
}

impl Pen {
    pub fn label(self) -> &'static str {
        match self {
            Pen::Thin => "THIN",
            Pen::Thick => "THICK",
        }
    }

    pub fn thickness(self, config: &SketchConfig) -> f32 {
        match self {
            Pen::Thin => config.thin_thickness,
            Pen::Thick => config.thick_thickness,
        }
    }
}

/// What the next gesture will produce.
///
/// A selected glyph puts the tool in stamp mode; otherwise gestures draw
/// strokes at `thickness`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    thickness: f32,
    glyph: Option<String>,
    color: Color32,
    spacing: f32,
}

impl ToolState {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            thickness: config.start_thickness,
            glyph: None,
            color: Color32::WHITE,
            spacing: config.stamp_spacing,
        }
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn is_stamping(&self) -> bool {
        self.glyph.is_some()
    }

    /// Switch to freehand mode at `thickness` with a fresh random color.
    pub fn select_pen(&mut self, thickness: f32, rng: &mut impl Rng) {
        self.thickness = thickness;
        self.glyph = None;
        self.color = Color32::from_rgb(rng.random(), rng.random(), rng.random());
    }

    /// Switch to stamp mode. Thickness is kept for when a pen is picked again.
    pub fn select_glyph(&mut self, glyph: impl Into<String>) {
        self.glyph = Some(glyph.into());
    }

    /// Start the drawable a gesture beginning at `start` would produce.
    pub fn begin(&self, start: Point) -> Drawable {
        match &self.glyph {
            Some(glyph) => StampTrail::new(glyph.clone(), start, self.spacing, PREVIEW_COLOR).into(),
            None => Stroke::new(start, self.thickness, self.color).into(),
        }
    }

    /// The preview this tool shows at `position`.
    pub fn preview_at(&self, position: Point) -> Preview {
        match &self.glyph {
            Some(glyph) => Preview::Glyph {
                origin: position,
                glyph: glyph.clone(),
                color: PREVIEW_COLOR,
            },
            None => Preview::Dot {
                center: position,
                radius: self.thickness,
                color: PREVIEW_COLOR,
            },
        }
    }
}

/// Sticker glyphs offered as stamp tools, in insertion order.
///
/// Append-only; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickerPalette {
    stickers: Vec<String>,
}

impl StickerPalette {
    pub fn new(initial: impl IntoIterator<Item = String>) -> Self {
        Self {
            stickers: initial.into_iter().filter(|glyph| !glyph.is_empty()).collect(),
        }
    }

    /// Append a custom sticker. Empty input is ignored.
    ///
    /// Returns the index of the new entry.
    pub fn add(&mut self, glyph: &str) -> Option<usize> {
        if glyph.is_empty() {
            return None;
        }
        self.stickers.push(glyph.to_owned());
        Some(self.stickers.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.stickers.get(index).map(String::as_str)
    }

    pub fn stickers(&self) -> &[String] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}
