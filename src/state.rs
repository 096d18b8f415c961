use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::SketchConfig;
use crate::history::History;
use crate::input::Gesture;
use crate::preview::Preview;
use crate::renderer::{DrawingObserver, Scene};
use crate::tools::{Pen, StickerPalette, ToolState};

/// All mutable sketchpad state, built once at startup.
///
/// Every operation that changes what is on the canvas takes the observer to
/// notify once the change is made. Pointer handling lives in [`crate::input`].
#[derive(Debug, Clone)]
pub struct EditorState {
    pub(crate) history: History,
    pub(crate) preview: Option<Preview>,
    pub(crate) tool: ToolState,
    pub(crate) palette: StickerPalette,
    pub(crate) gesture: Gesture,
    pub(crate) discard_degenerate_strokes: bool,
    pen_thickness: [f32; 2],
    rng: SmallRng,
}

impl EditorState {
    pub fn new(config: &SketchConfig) -> Self {
        Self::with_seed(config, 0)
    }

    /// Like [`EditorState::new`] with a seed for the random pen colors.
    pub fn with_seed(config: &SketchConfig, seed: u64) -> Self {
        Self {
            history: History::new(),
            preview: None,
            tool: ToolState::new(config),
            palette: StickerPalette::new(config.initial_stickers.iter().cloned()),
            gesture: Gesture::Idle,
            discard_degenerate_strokes: config.discard_degenerate_strokes,
            pen_thickness: [
                Pen::Thin.thickness(config),
                Pen::Thick.thickness(config),
            ],
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn palette(&self) -> &StickerPalette {
        &self.palette
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            drawables: self.history.committed(),
            preview: self.preview.as_ref(),
        }
    }

    pub(crate) fn notify(&self, observer: &mut dyn DrawingObserver) {
        observer.drawing_changed(self.scene());
    }

    /// Ask for a repaint without changing anything, e.g. after a resize.
    pub fn refresh(&self, observer: &mut dyn DrawingObserver) {
        self.notify(observer);
    }

    pub fn undo(&mut self, observer: &mut dyn DrawingObserver) {
        let abandoned = self.abandon_gesture();
        if self.history.undo() {
            log::debug!("undo: {} committed", self.history.committed().len());
            self.notify(observer);
        } else if abandoned {
            self.notify(observer);
        }
    }

    /// Restore the newest undone drawable. With nothing to redo this is a
    /// no-op, and a live gesture keeps going.
    pub fn redo(&mut self, observer: &mut dyn DrawingObserver) {
        if !self.history.can_redo() {
            return;
        }
        self.abandon_gesture();
        if self.history.redo() {
            log::debug!("redo: {} committed", self.history.committed().len());
            self.notify(observer);
        }
    }

    /// Wipe the canvas. Not undoable.
    pub fn clear_all(&mut self, observer: &mut dyn DrawingObserver) {
        self.abandon_gesture();
        self.history.clear_all();
        log::debug!("cleared canvas");
        self.notify(observer);
    }

    pub fn select_pen(&mut self, pen: Pen, observer: &mut dyn DrawingObserver) {
        let thickness = match pen {
            Pen::Thin => self.pen_thickness[0],
            Pen::Thick => self.pen_thickness[1],
        };
        self.tool.select_pen(thickness, &mut self.rng);
        log::info!("pen {} selected, thickness {thickness}", pen.label());
        self.refresh_preview();
        self.notify(observer);
    }

    /// Select the palette entry at `index` as the stamp glyph.
    pub fn select_sticker(&mut self, index: usize, observer: &mut dyn DrawingObserver) {
        let Some(glyph) = self.palette.get(index) else {
            log::warn!("no sticker at index {index}");
            return;
        };
        log::info!("sticker {glyph} selected");
        self.tool.select_glyph(glyph);
        self.refresh_preview();
        self.notify(observer);
    }

    /// Take the answer of the custom-sticker prompt. A cancelled or empty
    /// answer leaves the palette alone.
    pub fn add_custom_sticker(
        &mut self,
        answer: Option<&str>,
        observer: &mut dyn DrawingObserver,
    ) -> Option<usize> {
        let index = self.palette.add(answer?)?;
        log::info!("custom sticker {} added", self.palette.stickers()[index]);
        self.notify(observer);
        Some(index)
    }

    /// Rebuild a visible preview in the shape of the current tool.
    fn refresh_preview(&mut self) {
        if let Some(preview) = &self.preview {
            self.preview = Some(self.tool.preview_at(preview.position()));
        }
    }

    /// Drop back to idle so a live gesture never grows a drawable it no
    /// longer owns. Returns whether a gesture was dropped.
    fn abandon_gesture(&mut self) -> bool {
        if self.gesture != Gesture::Drawing {
            return false;
        }
        log::debug!("gesture abandoned by history edit");
        self.gesture = Gesture::Idle;
        self.preview = None;
        true
    }
}
