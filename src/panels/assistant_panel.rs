use crate::AnnotatorApp;
use crate::extraction::ContextStatus;

/// Side panel that shows what page content the assistant would see.
pub fn assistant_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    if let Some(seed) = app.engine.take_assistant_seed() {
        app.assistant_input = seed;
    }

    egui::SidePanel::right("assistant_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Assistant");

            let has_document = app.engine.document().is_some();
            ui.add_enabled_ui(has_document, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Use current page").clicked() {
                        let page = app.engine.view().page();
                        app.request_context(ctx, &[page]);
                    }
                    if ui.button("Use all pages").clicked() {
                        let count = app.engine.view().page_count().unwrap_or(0);
                        let pages: Vec<u32> = (1..=count).collect();
                        app.request_context(ctx, &pages);
                    }
                });
                if ui.button("Snapshot visible page").clicked() {
                    app.snapshot_page();
                }
            });
            if let Some(summary) = &app.page_snapshot {
                ui.weak(summary);
            }

            match app.engine.context_status() {
                ContextStatus::Idle => {
                    ui.weak("No page context");
                }
                ContextStatus::Pending(request) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Reading pages {:?}", request.pages));
                    });
                }
                ContextStatus::Ready(context) => {
                    ui.label(format!(
                        "{} page image(s), {} characters of text",
                        context.images.len(),
                        context.text.chars().count()
                    ));
                    if context.degraded {
                        ui.colored_label(
                            ui.visuals().warn_fg_color,
                            "Some content could not be read",
                        );
                    }
                    egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                        ui.monospace(&context.text);
                    });
                }
                ContextStatus::Unavailable(_) => {
                    ui.colored_label(ui.visuals().warn_fg_color, "The viewer returned no content");
                }
            }
            ui.separator();

            if let Some(selected) = app.canvas.selected {
                let quote = app
                    .engine
                    .current()
                    .get(selected)
                    .and_then(|a| a.text())
                    .map(str::to_owned);
                if let Some(quote) = quote {
                    if ui.button("Quote note").clicked() {
                        app.engine.seed_assistant(format!("> {quote}\n\n"));
                    }
                }
            }

            ui.add(
                egui::TextEdit::multiline(&mut app.assistant_input)
                    .hint_text("Ask about this document")
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
        });
}
