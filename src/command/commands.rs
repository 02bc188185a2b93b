use crate::tool::{ShapeVariant, ToolKind};

/// One engine operation requested by the input layer or a view.
///
/// Commands carry intent only; the engine decides whether they apply in the
/// current state (e.g. a tool change outside edit mode is a no-op).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    /// Add `delta` to the zoom scale (clamped)
    ZoomBy(f32),
    ToggleMagnify,
    SetTool(ToolKind),
    /// Pick a shape variant and switch to the shape tool
    SelectShape(ShapeVariant),
    /// Add `delta` to the line width (clamped)
    NudgeLineWidth(f32),
    SetEditMode(bool),
    BeginPanDrag,
    EndPanDrag,
    NextPage,
    PreviousPage,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ZoomBy(_) => "Zoom",
            Command::ToggleMagnify => "Toggle Magnify",
            Command::SetTool(_) => "Set Tool",
            Command::SelectShape(_) => "Select Shape",
            Command::NudgeLineWidth(_) => "Line Width",
            Command::SetEditMode(_) => "Edit Mode",
            Command::BeginPanDrag => "Begin Pan",
            Command::EndPanDrag => "End Pan",
            Command::NextPage => "Next Page",
            Command::PreviousPage => "Previous Page",
        }
    }
}
