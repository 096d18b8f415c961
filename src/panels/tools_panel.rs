use crate::NotedApp;
use crate::tools::Pen;

pub fn tools_panel(app: &mut NotedApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(160.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let tool = app.editor().tool();
            let stamping = tool.is_stamping();
            let thickness = tool.thickness();

            // Pen presets; highlighted while freehand mode is active
            for pen in [Pen::Thin, Pen::Thick] {
                let selected = !stamping && thickness == app.pen_thickness(pen);
                if ui.selectable_label(selected, pen.label()).clicked() {
                    app.select_pen(pen);
                }
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let history = app.editor().history();
                let can_undo = history.can_undo();
                let can_redo = history.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("UNDO")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("REDO")).clicked() {
                    app.redo();
                }
            });

            if ui.button("CLEAR").clicked() {
                app.clear();
            }
            if ui.button("EXPORT").clicked() {
                app.export();
            }
            if ui.button("Custom Sticker Creation").clicked() {
                app.open_sticker_prompt();
            }

            ui.separator();

            let history = app.editor().history();
            ui.label(format!("Drawn: {}", history.committed().len()));
            ui.label(format!("Redoable: {}", history.redo_buffer().len()));

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
