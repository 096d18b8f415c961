use crate::NotedApp;

pub fn central_panel(app: &mut NotedApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Claim the canvas so panel widgets do not react to drawing drags
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        app.handle_canvas_input(ctx, canvas_rect);
        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        app.renderer().paint(&painter, canvas_rect);
    });
}
