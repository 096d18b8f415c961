use crate::NotedApp;

/// Sticker buttons under the canvas, plus the custom sticker prompt.
pub fn sticker_panel(app: &mut NotedApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("sticker_panel").show(ctx, |ui| {
        // Collect first to avoid borrowing the app while handling clicks
        let stickers = app.editor().palette().stickers().to_vec();
        let selected = app.editor().tool().glyph().map(str::to_owned);

        ui.horizontal_wrapped(|ui| {
            for (index, glyph) in stickers.iter().enumerate() {
                let button = egui::Button::new(egui::RichText::new(glyph).size(22.0))
                    .selected(selected.as_deref() == Some(glyph.as_str()));
                if ui.add(button).clicked() {
                    app.select_sticker(index);
                }
            }
        });
    });

    let mut answer = None;
    if let Some(text) = app.sticker_prompt_mut() {
        egui::Window::new("Enter emoji:")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(text);
                response.request_focus();
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        answer = Some(Some(text.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(None);
                    }
                });
            });
    }
    if let Some(answer) = answer {
        app.submit_sticker_prompt(answer);
    }
}
