use egui::Color32;
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 144.0;

/// Inclusive range a line width is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for WidthLimits {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 100.0,
        }
    }
}

impl WidthLimits {
    pub fn clamp(&self, width: f32) -> f32 {
        width.clamp(self.min, self.max)
    }
}

/// Drawing properties shared by every drawing tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolProperties {
    pub color: Color32,
    pub line_width: f32,
    pub opacity: f32,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0xE5, 0x39, 0x35),
            line_width: 3.0,
            opacity: 1.0,
            font_family: None,
            font_size: None,
        }
    }
}

/// A partial update to [`ToolProperties`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPropertiesPatch {
    pub color: Option<Color32>,
    pub line_width: Option<f32>,
    pub opacity: Option<f32>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
}

impl ToolPropertiesPatch {
    pub fn color(color: Color32) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn line_width(width: f32) -> Self {
        Self {
            line_width: Some(width),
            ..Default::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }
}

impl ToolProperties {
    /// Apply a patch, clamping every numeric field into its domain.
    /// Non-finite numbers are dropped. Returns true if anything changed.
    pub fn apply(&mut self, patch: ToolPropertiesPatch, widths: &WidthLimits) -> bool {
        let before = self.clone();

        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(width) = patch.line_width.filter(|w| w.is_finite()) {
            self.line_width = widths.clamp(width);
        }
        if let Some(opacity) = patch.opacity.filter(|o| o.is_finite()) {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(family) = patch.font_family {
            let family = family.trim();
            self.font_family = (!family.is_empty()).then(|| family.to_owned());
        }
        if let Some(size) = patch.font_size.filter(|s| s.is_finite()) {
            self.font_size = Some(size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
        }

        *self != before
    }

    /// Bring values loaded from outside (config files) into range.
    pub(crate) fn sanitize(&mut self, widths: &WidthLimits) {
        self.line_width = if self.line_width.is_finite() {
            widths.clamp(self.line_width)
        } else {
            widths.min
        };
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.font_size = self
            .font_size
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
    }
}
