use crate::config::SketchConfig;
use crate::export::{FileSaver, export_png};
use crate::input::InputHandler;
use crate::panels::{central_panel, sticker_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::tools::Pen;

pub const APP_NAME: &str = "Noted";

/// The sketchpad window: editor state, its on-screen renderer and the
/// controls around the canvas.
pub struct NotedApp {
    editor: EditorState,
    renderer: Renderer,
    input: InputHandler,
    config: SketchConfig,
    saver: Box<dyn FileSaver>,
    /// Text of the custom sticker prompt while it is open.
    sticker_prompt: Option<String>,
    status: Option<String>,
}

impl NotedApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let renderer = Renderer::new(
            cc.egui_ctx.clone(),
            config.canvas_background_color(),
            config.glyph_size,
        );
        let editor = EditorState::with_seed(&config, color_seed());

        Self {
            editor,
            renderer,
            input: InputHandler::new(egui::Rect::NOTHING),
            saver: default_saver(&config),
            config,
            sticker_prompt: None,
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn undo(&mut self) {
        self.editor.undo(&mut self.renderer);
    }

    pub fn redo(&mut self) {
        self.editor.redo(&mut self.renderer);
    }

    pub fn clear(&mut self) {
        self.editor.clear_all(&mut self.renderer);
    }

    pub fn pen_thickness(&self, pen: Pen) -> f32 {
        pen.thickness(&self.config)
    }

    pub fn select_pen(&mut self, pen: Pen) {
        self.editor.select_pen(pen, &mut self.renderer);
    }

    pub fn select_sticker(&mut self, index: usize) {
        self.editor.select_sticker(index, &mut self.renderer);
    }

    pub fn open_sticker_prompt(&mut self) {
        self.sticker_prompt = Some(String::new());
    }

    pub(crate) fn sticker_prompt_mut(&mut self) -> Option<&mut String> {
        self.sticker_prompt.as_mut()
    }

    /// Close the prompt. `None` means it was cancelled.
    pub fn submit_sticker_prompt(&mut self, answer: Option<String>) {
        self.sticker_prompt = None;
        self.editor
            .add_custom_sticker(answer.as_deref(), &mut self.renderer);
    }

    pub fn export(&mut self) {
        let filename = self.config.export.filename.clone();
        let result = export_png(self.editor.history().committed(), &self.config.export)
            .and_then(|png| self.saver.save(&png, &filename));
        self.status = Some(match result {
            Ok(()) => format!("Exported {filename}"),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    /// Feed this frame's pointer input to the editor and track the canvas.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.input.set_canvas_rect(canvas_rect);
        if self.renderer.set_canvas_size(canvas_rect.size()) {
            self.editor.refresh(&mut self.renderer);
        }
        if self.sticker_prompt.is_some() {
            return;
        }
        for event in self.input.process_input(ctx) {
            self.editor.handle_event(event, &mut self.renderer);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, KeyboardShortcut, Modifiers};

        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo_alt = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

        // Consume the longer shortcut first so Shift+Z is not read as undo
        let (redo_pressed, undo_pressed) = ctx.input_mut(|input| {
            let redo = input.consume_shortcut(&redo) || input.consume_shortcut(&redo_alt);
            (redo, input.consume_shortcut(&undo))
        });
        if redo_pressed {
            self.redo();
        }
        if undo_pressed {
            self.undo();
        }
    }
}

impl eframe::App for NotedApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.sticker_prompt.is_none() {
            self.handle_shortcuts(ctx);
        }

        egui::TopBottomPanel::top("title_banner").show(ctx, |ui| {
            ui.heading(APP_NAME);
        });
        tools_panel(self, ctx);
        sticker_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_saver(config: &SketchConfig) -> Box<dyn FileSaver> {
    Box::new(crate::export::DiskSaver::new(config.export.directory.clone()))
}

#[cfg(target_arch = "wasm32")]
fn default_saver(_config: &SketchConfig) -> Box<dyn FileSaver> {
    Box::new(crate::export::BrowserDownload)
}

#[cfg(not(target_arch = "wasm32"))]
fn color_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

#[cfg(target_arch = "wasm32")]
fn color_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
