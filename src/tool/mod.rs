mod cursor;
mod properties;
mod state;

pub use cursor::{CursorMode, cursor_mode};
pub use properties::{ToolProperties, ToolPropertiesPatch, WidthLimits};
pub use state::ToolState;

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationKind;

/// The tool the user is currently interacting with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    None,
    Select,
    Pan,
    Pen,
    Highlight,
    Eraser,
    Shape,
    Text,
    Magnify,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::None,
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Pen,
        ToolKind::Highlight,
        ToolKind::Eraser,
        ToolKind::Shape,
        ToolKind::Text,
        ToolKind::Magnify,
    ];

    /// Tools that only make sense while edit mode is on.
    pub fn requires_edit_mode(self) -> bool {
        !matches!(self, Self::None | Self::Pan | Self::Magnify)
    }

    /// The annotation kind a completed gesture with this tool produces.
    pub fn annotation_kind(self) -> Option<AnnotationKind> {
        match self {
            Self::Pen => Some(AnnotationKind::Pen),
            Self::Highlight => Some(AnnotationKind::Highlight),
            Self::Eraser => Some(AnnotationKind::EraserMark),
            Self::Shape => Some(AnnotationKind::Shape),
            Self::Text => Some(AnnotationKind::Text),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Select => "Select",
            Self::Pan => "Pan",
            Self::Pen => "Pen",
            Self::Highlight => "Highlight",
            Self::Eraser => "Eraser",
            Self::Shape => "Shape",
            Self::Text => "Text",
            Self::Magnify => "Magnify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeVariant {
    #[default]
    Rectangle,
    Circle,
    Line,
    Arrow,
}

impl ShapeVariant {
    pub const ALL: [ShapeVariant; 4] = [
        ShapeVariant::Rectangle,
        ShapeVariant::Circle,
        ShapeVariant::Line,
        ShapeVariant::Arrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Line => "Line",
            Self::Arrow => "Arrow",
        }
    }
}
