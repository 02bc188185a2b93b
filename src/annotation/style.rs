use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::tool::ToolProperties;

pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f32,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_owned(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Rendering properties frozen into an annotation when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub color: Color32,
    pub line_width: f32,
    pub opacity: f32,
    pub font: Option<FontStyle>,
}

impl AnnotationStyle {
    /// Copy the active tool properties. Text always gets a font, falling back
    /// to the default family/size for whatever the properties leave unset.
    pub fn snapshot(properties: &ToolProperties, with_font: bool) -> Self {
        let font = with_font.then(|| {
            let fallback = FontStyle::default();
            FontStyle {
                family: properties.font_family.clone().unwrap_or(fallback.family),
                size: properties.font_size.unwrap_or(fallback.size),
            }
        });

        Self {
            color: properties.color,
            line_width: properties.line_width,
            opacity: properties.opacity,
            font,
        }
    }

    /// Color with the style's opacity folded into the alpha channel.
    pub fn paint_color(&self) -> Color32 {
        self.color.gamma_multiply(self.opacity)
    }
}
