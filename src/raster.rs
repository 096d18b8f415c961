//! Offscreen raster surface used for export.
//!
//! Paths and circles are drawn with tiny-skia under a uniform scale
//! transform. Glyphs are rasterized with swash from the fonts egui ships,
//! walking the proportional family as a fallback chain.

use std::borrow::Cow;
use std::io::Cursor;

use egui::{Color32, FontFamily, Rect, Vec2};
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::error::ExportError;
use crate::surface::{Point, Surface};

/// Font bytes plus face index, in fallback order.
struct GlyphFonts {
    faces: Vec<(Cow<'static, [u8]>, usize)>,
    context: ScaleContext,
}

impl GlyphFonts {
    fn from_egui_defaults() -> Self {
        let definitions = egui::FontDefinitions::default();
        let faces = definitions
            .families
            .get(&FontFamily::Proportional)
            .into_iter()
            .flatten()
            .filter_map(|name| definitions.font_data.get(name))
            .map(|data| (data.font.clone(), data.index as usize))
            .collect();
        Self {
            faces,
            context: ScaleContext::new(),
        }
    }
}

/// A pixmap that implements [`Surface`] at `scale` pixels per canvas unit.
pub struct RasterSurface {
    pixmap: Pixmap,
    scale: f32,
    glyph_size: f32,
    fonts: Option<GlyphFonts>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, scale: f32, glyph_size: f32) -> Result<Self, ExportError> {
        let pixmap = Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;
        Ok(Self {
            pixmap,
            scale,
            glyph_size,
            fonts: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill every pixel with `color`, ignoring the scale.
    pub fn fill_background(&mut self, color: Color32) {
        self.pixmap.fill(skia_color(color));
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// Straight-alpha RGBA bytes of the current contents.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect()
    }

    /// Serialize the current contents as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let image = image::RgbaImage::from_raw(self.width(), self.height(), self.to_rgba())
            .ok_or_else(|| ExportError::Raster("pixel buffer does not match image size".into()))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn paint(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(
            self.width() as f32 / self.scale,
            self.height() as f32 / self.scale,
        )
    }

    fn clear(&mut self, rect: Rect) {
        let Some(area) = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        let transform = self.transform();
        self.pixmap.fill_rect(area, &paint, transform, None);
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, transform, None);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }

    fn draw_glyph(&mut self, origin: Point, glyph: &str, color: Color32) {
        let mut fonts = self.fonts.take().unwrap_or_else(GlyphFonts::from_egui_defaults);
        let size = self.glyph_size * self.scale;
        let baseline = (origin.y * self.scale).round() as i32;
        let mut pen_x = origin.x * self.scale;
        let tint = color.to_srgba_unmultiplied();

        for ch in glyph.chars() {
            let Some((font, glyph_id)) = lookup(&fonts.faces, ch) else {
                log::debug!("no default font covers {ch:?}");
                continue;
            };
            let units_per_em = f32::from(font.metrics(&[]).units_per_em.max(1));
            let advance = font.glyph_metrics(&[]).advance_width(glyph_id) * size / units_per_em;

            let mut scaler = fonts.context.builder(font).size(size).build();
            let mut render = Render::new(&[
                Source::ColorOutline(0),
                Source::ColorBitmap(StrikeWith::BestFit),
                Source::Outline,
            ]);
            render.format(Format::Alpha);

            if let Some(image) = render.render(&mut scaler, glyph_id) {
                if let Some(bitmap) = glyph_pixmap(&image, tint) {
                    let left = pen_x.round() as i32 + image.placement.left;
                    let top = baseline - image.placement.top;
                    self.pixmap.draw_pixmap(
                        left,
                        top,
                        bitmap.as_ref(),
                        &PixmapPaint::default(),
                        Transform::identity(),
                        None,
                    );
                }
            }
            pen_x += advance;
        }

        self.fonts = Some(fonts);
    }
}

/// Premultiplied pixmap of one swash glyph image. Masks are tinted with
/// `tint`; color glyphs keep their own colors.
fn glyph_pixmap(image: &swash::scale::image::Image, tint: [u8; 4]) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.placement.width, image.placement.height)?;
    let [r, g, b, a] = tint;
    let tinted = |coverage: u8| {
        let alpha = (u16::from(a) * u16::from(coverage) / 255) as u8;
        ColorU8::from_rgba(r, g, b, alpha).premultiply()
    };
    let pixels: Vec<_> = match image.content {
        Content::Mask => image.data.iter().map(|&coverage| tinted(coverage)).collect(),
        Content::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| tinted(((u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])) / 3) as u8))
            .collect(),
        Content::Color => image
            .data
            .chunks_exact(4)
            .map(|px| ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply())
            .collect(),
    };
    let data = pixels
        .iter()
        .flat_map(|px| [px.red(), px.green(), px.blue(), px.alpha()])
        .collect();
    Pixmap::from_vec(data, size)
}

/// First face whose charmap covers `ch`, with its glyph id.
fn lookup<'a>(faces: &'a [(Cow<'static, [u8]>, usize)], ch: char) -> Option<(swash::FontRef<'a>, u16)> {
    faces.iter().find_map(|(data, index)| {
        let font = swash::FontRef::from_index(data.as_ref(), *index)?;
        let glyph_id = font.charmap().map(ch);
        (glyph_id != 0).then_some((font, glyph_id))
    })
}
