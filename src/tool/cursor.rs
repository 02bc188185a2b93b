use super::ToolKind;

/// Pointer presentation over the page. Never stored; recomputed from tool
/// state whenever something changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Default,
    Crosshair,
    Text,
    Eraser,
    Grab,
    Grabbing,
    ZoomIn,
}

pub fn cursor_mode(tool: ToolKind, is_pan_dragging: bool, is_magnify_active: bool) -> CursorMode {
    if is_magnify_active {
        return CursorMode::ZoomIn;
    }
    match tool {
        ToolKind::Pan if is_pan_dragging => CursorMode::Grabbing,
        ToolKind::Pan => CursorMode::Grab,
        ToolKind::Pen | ToolKind::Highlight | ToolKind::Shape => CursorMode::Crosshair,
        ToolKind::Eraser => CursorMode::Eraser,
        ToolKind::Text => CursorMode::Text,
        ToolKind::Magnify => CursorMode::ZoomIn,
        ToolKind::Select | ToolKind::None => CursorMode::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_cursor_follows_drag() {
        assert_eq!(cursor_mode(ToolKind::Pan, false, false), CursorMode::Grab);
        assert_eq!(cursor_mode(ToolKind::Pan, true, false), CursorMode::Grabbing);
    }

    #[test]
    fn magnify_wins() {
        for tool in ToolKind::ALL {
            assert_eq!(cursor_mode(tool, true, true), CursorMode::ZoomIn);
        }
    }

    #[test]
    fn drag_flag_ignored_off_pan() {
        assert_eq!(cursor_mode(ToolKind::Pen, true, false), CursorMode::Crosshair);
        assert_eq!(cursor_mode(ToolKind::Select, true, false), CursorMode::Default);
    }
}
