mod assistant_panel;
mod central_panel;
mod tools_panel;

pub use assistant_panel::assistant_panel;
pub use central_panel::{CanvasState, central_panel};
pub use tools_panel::tools_panel;
