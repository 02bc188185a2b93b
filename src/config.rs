use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tool::{ToolProperties, WidthLimits};
use crate::view::ZoomLimits;

/// Engine tuning. Any field missing from a config file takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub zoom: ZoomLimits,
    pub line_width: WidthLimits,
    pub default_properties: ToolProperties,
    /// Open in edit mode (select tool) instead of view mode (pan tool)
    pub start_in_edit_mode: bool,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Loading engine config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Narrow the configured ranges to the built-in ones and replace
    /// nonsensical values with the defaults.
    pub fn sanitized(mut self) -> Self {
        let domain = ZoomLimits::default();
        let zoom = self.zoom;
        let (min, max) = (zoom.min.max(domain.min), zoom.max.min(domain.max));
        if !(min.is_finite() && max.is_finite() && min <= max) {
            log::warn!("Ignoring invalid zoom range {}..{}", zoom.min, zoom.max);
            self.zoom.min = domain.min;
            self.zoom.max = domain.max;
        } else if (min, max) != (zoom.min, zoom.max) {
            log::warn!("Zoom range {}..{} narrowed to {min}..{max}", zoom.min, zoom.max);
            self.zoom.min = min;
            self.zoom.max = max;
        }
        if !(self.zoom.step.is_finite() && self.zoom.step > 0.0) {
            self.zoom.step = domain.step;
        }
        if !(self.zoom.wheel_factor.is_finite() && self.zoom.wheel_factor > 0.0) {
            self.zoom.wheel_factor = domain.wheel_factor;
        }

        let domain = WidthLimits::default();
        let widths = self.line_width;
        let (min, max) = (widths.min.max(domain.min), widths.max.min(domain.max));
        if !(min.is_finite() && max.is_finite() && min <= max) {
            log::warn!("Ignoring invalid line width range {}..{}", widths.min, widths.max);
            self.line_width = domain;
        } else if (min, max) != (widths.min, widths.max) {
            log::warn!("Line width range {}..{} narrowed to {min}..{max}", widths.min, widths.max);
            self.line_width = WidthLimits { min, max };
        }

        self.default_properties.sanitize(&self.line_width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "start_in_edit_mode": true }"#).unwrap();
        assert!(config.start_in_edit_mode);
        assert_eq!(config.zoom, ZoomLimits::default());
        assert_eq!(config.line_width, WidthLimits::default());
    }

    #[test]
    fn inverted_ranges_fall_back() {
        let json = r#"{
            "zoom": { "min": 5.0, "max": 1.0 },
            "line_width": { "min": 50.0, "max": 10.0 },
            "default_properties": { "line_width": 400.0, "opacity": 3.0 }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.zoom.min, 0.25);
        assert_eq!(config.zoom.max, 4.0);
        assert_eq!(config.line_width, WidthLimits::default());
        assert_eq!(config.default_properties.line_width, 100.0);
        assert_eq!(config.default_properties.opacity, 1.0);
    }

    #[test]
    fn widening_ranges_are_narrowed() {
        let json = r#"{"line_width":{"min":0.5,"max":500},"zoom":{"min":0.05,"max":20}}"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.line_width, WidthLimits { min: 1.0, max: 100.0 });
        assert_eq!(config.zoom.min, 0.25);
        assert_eq!(config.zoom.max, 4.0);

        // A range inside the built-in one is kept as is
        let json = r#"{"line_width":{"min":2,"max":50},"zoom":{"min":0.5,"max":2}}"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.line_width, WidthLimits { min: 2.0, max: 50.0 });
        assert_eq!((config.zoom.min, config.zoom.max), (0.5, 2.0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
