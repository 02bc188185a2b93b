use eframe::egui;

use crate::tool::ToolKind;

pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
    pub enabled: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool, enabled: bool) -> Self {
        Self {
            tool,
            selected,
            enabled,
        }
    }

    pub fn icon(tool: ToolKind) -> &'static str {
        match tool {
            ToolKind::None => "·",
            ToolKind::Select => "⬉",
            ToolKind::Pan => "✋",
            ToolKind::Pen => "✏",
            ToolKind::Highlight => "🖍",
            ToolKind::Eraser => "⌫",
            ToolKind::Shape => "⬜",
            ToolKind::Text => "T",
            ToolKind::Magnify => "🔍",
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246)
            } else if self.enabled && response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else if self.enabled {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_gray(90)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                Self::icon(self.tool),
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.tool.name())
    }
}
