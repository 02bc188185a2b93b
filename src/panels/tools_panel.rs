use crate::AnnotatorApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::tool::{ShapeVariant, ToolKind, ToolPropertiesPatch};

pub fn tools_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("document_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Open sample").clicked() {
                app.open_sample();
            }
            match app.engine.document() {
                Some(document) => {
                    ui.label(format!("{} ({} bytes)", document.name, document.size_bytes))
                }
                None => ui.weak("No document"),
            };
            if let Some(error) = &app.last_error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut edit_mode = app.engine.tools().edit_mode();
                if ui.toggle_value(&mut edit_mode, "Edit").changed() {
                    app.engine.apply(Command::SetEditMode(edit_mode));
                }
            });
        });
    });

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            let snapshot = app.engine.snapshot();

            ui.heading("Tools");
            ui.horizontal_wrapped(|ui| {
                for tool in ToolKind::ALL {
                    if tool == ToolKind::None {
                        continue;
                    }
                    let enabled = snapshot.edit_mode || !tool.requires_edit_mode();
                    let button = ToolButton::new(tool, snapshot.active_tool == tool, enabled);
                    if button.show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", tool.name());
                        if tool == ToolKind::Magnify {
                            app.engine.toggle_magnify();
                        } else {
                            app.engine.set_active_tool(tool);
                        }
                    }
                }
            });

            ui.add_enabled_ui(snapshot.edit_mode, |ui| {
                egui::ComboBox::from_id_salt("shape_variant")
                    .selected_text(snapshot.active_shape.name())
                    .show_ui(ui, |ui| {
                        for variant in ShapeVariant::ALL {
                            let selected = snapshot.active_shape == variant;
                            if ui.selectable_label(selected, variant.name()).clicked() {
                                app.engine.select_shape(variant);
                            }
                        }
                    });
            });
            ui.separator();

            ui.label("Style");
            let props = &snapshot.properties;
            let mut color = props.color;
            if ui.color_edit_button_srgba(&mut color).changed() {
                app.engine.set_properties(ToolPropertiesPatch::color(color));
            }
            let widths = app.engine.config().line_width;
            let mut width = props.line_width;
            if ui
                .add(egui::Slider::new(&mut width, widths.min..=widths.max).text("Width"))
                .changed()
            {
                app.engine.set_properties(ToolPropertiesPatch::line_width(width));
            }
            let mut opacity = props.opacity;
            if ui
                .add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"))
                .changed()
            {
                app.engine.set_properties(ToolPropertiesPatch::opacity(opacity));
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(snapshot.can_undo, egui::Button::new("Undo")).clicked() {
                    app.engine.undo();
                }
                if ui.add_enabled(snapshot.can_redo, egui::Button::new("Redo")).clicked() {
                    app.engine.redo();
                }
            });
            let history = app.engine.history();
            ui.weak(format!("Step {} of {}", history.step(), history.len() - 1));
            ui.separator();

            ui.label("View");
            ui.horizontal(|ui| {
                let step = app.engine.view().limits().step;
                if ui.button("−").clicked() {
                    app.engine.zoom_by(-step);
                }
                if ui.button(format!("{:.0}%", snapshot.scale * 100.0)).clicked() {
                    app.engine.reset_zoom();
                }
                if ui.button("+").clicked() {
                    app.engine.zoom_by(step);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("⟲").clicked() {
                    app.engine.rotate_counter_clockwise();
                }
                ui.label(format!("{}°", snapshot.rotation));
                if ui.button("⟳").clicked() {
                    app.engine.rotate_clockwise();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    app.engine.apply(Command::PreviousPage);
                }
                ui.label(format!("Page {} / {}", snapshot.page, snapshot.page_count.unwrap_or(1)));
                if ui.button("▶").clicked() {
                    app.engine.apply(Command::NextPage);
                }
            });
            let mut continuous = snapshot.continuous;
            if ui.checkbox(&mut continuous, "Continuous").changed() {
                app.engine.set_continuous(continuous);
            }
            let mut horizontal = snapshot.horizontal;
            if ui.checkbox(&mut horizontal, "Horizontal").changed() {
                app.engine.set_horizontal(horizontal);
            }
            ui.separator();

            let can_clear = snapshot.edit_mode && !snapshot.annotations.is_empty();
            if ui.add_enabled(can_clear, egui::Button::new("Clear all")).clicked() {
                app.engine.request_clear_all();
            }
        });
}
