//! The tool-selection state machine.
//!
//! Holds the active tool, the active shape variant, the shared drawing
//! properties and the edit-mode flag. Edit mode lives here, next to the tool,
//! so that flipping it and forcing the matching tool is one transition:
//!
//! ```text
//!   edit mode off:  None | Pan | Magnify
//!   edit mode on:   any tool
//!
//!   enter edit mode ──► Select
//!   leave edit mode ──► Pan
//!   magnify off     ──► Select (edit mode on) / Pan (edit mode off)
//! ```
//!
//! Properties are sticky: no tool transition touches them, and history
//! operations never touch this state at all.
use super::{ShapeVariant, ToolKind, ToolProperties, ToolPropertiesPatch, WidthLimits};

#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    active_tool: ToolKind,
    active_shape: ShapeVariant,
    properties: ToolProperties,
    edit_mode: bool,
    widths: WidthLimits,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(ToolProperties::default(), WidthLimits::default(), false)
    }
}

impl ToolState {
    pub fn new(mut properties: ToolProperties, widths: WidthLimits, edit_mode: bool) -> Self {
        properties.sanitize(&widths);
        Self {
            active_tool: Self::mode_tool(edit_mode),
            active_shape: ShapeVariant::default(),
            properties,
            edit_mode,
            widths,
        }
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn active_shape(&self) -> ShapeVariant {
        self.active_shape
    }

    pub fn properties(&self) -> &ToolProperties {
        &self.properties
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_magnify_active(&self) -> bool {
        self.active_tool == ToolKind::Magnify
    }

    /// Tool that goes with an edit-mode value.
    fn mode_tool(edit_mode: bool) -> ToolKind {
        if edit_mode { ToolKind::Select } else { ToolKind::Pan }
    }

    /// Switch tools. Edit-only tools are refused while edit mode is off.
    /// Returns true if the active tool changed.
    pub fn set_active_tool(&mut self, tool: ToolKind) -> bool {
        if tool.requires_edit_mode() && !self.edit_mode {
            log::debug!("Refusing {} outside edit mode", tool.name());
            return false;
        }
        self.replace_tool(tool)
    }

    fn replace_tool(&mut self, tool: ToolKind) -> bool {
        if self.active_tool == tool {
            return false;
        }
        log::debug!("Tool {} -> {}", self.active_tool.name(), tool.name());
        self.active_tool = tool;
        true
    }

    /// Change the shape variant without changing the active tool.
    pub fn set_active_shape(&mut self, variant: ShapeVariant) -> bool {
        let changed = self.active_shape != variant;
        self.active_shape = variant;
        changed
    }

    /// Pick a shape variant and switch to the shape tool in one step.
    /// Refused as a whole outside edit mode.
    pub fn select_shape(&mut self, variant: ShapeVariant) -> bool {
        if !self.edit_mode {
            return false;
        }
        let shape_changed = self.set_active_shape(variant);
        let tool_changed = self.replace_tool(ToolKind::Shape);
        shape_changed || tool_changed
    }

    pub fn set_properties(&mut self, patch: ToolPropertiesPatch) -> bool {
        self.properties.apply(patch, &self.widths)
    }

    /// Step the line width by `delta`, clamped.
    pub fn nudge_line_width(&mut self, delta: f32) -> bool {
        let width = self.properties.line_width + delta;
        self.set_properties(ToolPropertiesPatch::line_width(width))
    }

    /// Flip magnify. Turning it off lands on the edit-mode tool as of now,
    /// not on whatever was active before magnify.
    pub fn toggle_magnify(&mut self) -> ToolKind {
        let next = if self.is_magnify_active() {
            Self::mode_tool(self.edit_mode)
        } else {
            ToolKind::Magnify
        };
        self.replace_tool(next);
        self.active_tool
    }

    /// Enter or leave edit mode, forcing select/pan together with the flip.
    /// Returns true if the mode flag changed.
    pub fn set_edit_mode(&mut self, edit_mode: bool) -> bool {
        let changed = self.edit_mode != edit_mode;
        self.edit_mode = edit_mode;
        self.replace_tool(Self::mode_tool(edit_mode));
        changed
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_mode_tool() {
        assert_eq!(ToolState::default().active_tool(), ToolKind::Pan);
        let editing = ToolState::new(ToolProperties::default(), WidthLimits::default(), true);
        assert_eq!(editing.active_tool(), ToolKind::Select);
    }

    #[test]
    fn edit_tools_refused_outside_edit_mode() {
        let mut tools = ToolState::default();
        assert!(!tools.set_active_tool(ToolKind::Pen));
        assert!(!tools.select_shape(ShapeVariant::Circle));
        assert_eq!(tools.active_tool(), ToolKind::Pan);
        assert_eq!(tools.active_shape(), ShapeVariant::Rectangle);
        assert!(tools.set_active_tool(ToolKind::Magnify));
    }

    #[test]
    fn select_shape_sets_both() {
        let mut tools = ToolState::default();
        tools.set_edit_mode(true);
        assert!(tools.select_shape(ShapeVariant::Line));
        assert_eq!(tools.active_tool(), ToolKind::Shape);
        assert_eq!(tools.active_shape(), ShapeVariant::Line);
        assert!(!tools.select_shape(ShapeVariant::Line));
    }

    #[test]
    fn properties_survive_tool_switches() {
        let mut tools = ToolState::default();
        tools.set_edit_mode(true);
        tools.set_active_tool(ToolKind::Pen);
        tools.set_properties(ToolPropertiesPatch::line_width(12.0));
        tools.set_edit_mode(false);
        tools.toggle_magnify();
        tools.toggle_magnify();
        tools.set_edit_mode(true);
        tools.set_active_tool(ToolKind::Pen);
        assert_eq!(tools.properties().line_width, 12.0);
    }
}
