use crate::document::DocumentId;
use crate::tool::{ShapeVariant, ToolKind};

/// Change notifications emitted after the engine accepts an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    ShapeChanged(ShapeVariant),
    PropertiesChanged,
    EditModeChanged(bool),
    HistoryChanged {
        step: usize,
        len: usize,
    },
    ViewChanged {
        page: u32,
        scale: f32,
        rotation: u16,
    },
    DocumentLoaded(DocumentId),
    DocumentReady {
        page_count: u32,
    },
    ContextUpdated,
    /// A clear-all is waiting for the user to confirm
    ClearRequested,
}
