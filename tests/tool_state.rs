use egui::Key;
use pdf_annotate::input::{Dispatch, FocusContext, InputEvent, KeyPress};
use pdf_annotate::tool::{CursorMode, ShapeVariant, ToolKind, ToolPropertiesPatch};
use pdf_annotate::{Engine, EngineConfig};

fn press(engine: &mut Engine, key: Key) -> Dispatch {
    engine.handle_input(&InputEvent::Key(KeyPress::plain(key)), FocusContext::Canvas)
}

fn editing_engine() -> Engine {
    Engine::new(EngineConfig {
        start_in_edit_mode: true,
        ..Default::default()
    })
}

#[test]
fn test_initial_tool_follows_edit_mode() {
    assert_eq!(Engine::default().tools().active_tool(), ToolKind::Pan);
    assert_eq!(editing_engine().tools().active_tool(), ToolKind::Select);
}

#[test]
fn test_magnify_round_trip_restores_mode_tool() {
    let mut engine = editing_engine();
    engine.set_active_tool(ToolKind::Pen);
    assert_eq!(engine.toggle_magnify(), ToolKind::Magnify);
    assert_eq!(engine.toggle_magnify(), ToolKind::Select);

    let mut engine = Engine::default();
    assert_eq!(engine.toggle_magnify(), ToolKind::Magnify);
    assert_eq!(engine.toggle_magnify(), ToolKind::Pan);
}

#[test]
fn test_magnify_key_from_pen_then_view_mode() {
    let mut engine = editing_engine();
    engine.set_active_tool(ToolKind::Pen);

    press(&mut engine, Key::M);
    assert_eq!(engine.tools().active_tool(), ToolKind::Magnify);
    assert_eq!(engine.cursor_mode(), CursorMode::ZoomIn);

    // Leaving edit mode forces pan, even out of magnify
    engine.set_edit_mode(false);
    assert_eq!(engine.tools().active_tool(), ToolKind::Pan);

    press(&mut engine, Key::M);
    assert_eq!(engine.tools().active_tool(), ToolKind::Magnify);
    press(&mut engine, Key::M);
    assert_eq!(engine.tools().active_tool(), ToolKind::Pan);
}

#[test]
fn test_edit_mode_transitions_force_select_or_pan() {
    for tool in ToolKind::ALL {
        let mut engine = editing_engine();
        engine.set_active_tool(tool);
        engine.set_edit_mode(false);
        assert_eq!(engine.tools().active_tool(), ToolKind::Pan, "leaving from {tool:?}");

        if tool == ToolKind::Magnify || tool == ToolKind::None || tool == ToolKind::Pan {
            engine.set_active_tool(tool);
        }
        engine.set_edit_mode(true);
        assert_eq!(engine.tools().active_tool(), ToolKind::Select, "entering from {tool:?}");
    }
}

#[test]
fn test_edit_tools_refused_in_view_mode() {
    let mut engine = Engine::default();
    assert!(!engine.set_active_tool(ToolKind::Pen));
    assert!(!engine.select_shape(ShapeVariant::Circle));
    assert_eq!(engine.tools().active_tool(), ToolKind::Pan);
    assert_eq!(engine.tools().active_shape(), ShapeVariant::Rectangle);

    assert!(engine.set_active_tool(ToolKind::None));
    assert_eq!(engine.cursor_mode(), CursorMode::Default);
}

#[test]
fn test_properties_survive_tool_switches() {
    let mut engine = editing_engine();
    engine.set_active_tool(ToolKind::Pen);
    engine.set_properties(ToolPropertiesPatch::line_width(12.0));
    engine.set_properties(ToolPropertiesPatch::opacity(0.4));

    engine.toggle_magnify();
    engine.set_edit_mode(false);
    engine.set_edit_mode(true);
    engine.set_active_tool(ToolKind::Highlight);

    let props = engine.tools().properties();
    assert_eq!(props.line_width, 12.0);
    assert_eq!(props.opacity, 0.4);
}

#[test]
fn test_history_does_not_touch_tools() {
    let mut engine = editing_engine();
    engine.select_shape(ShapeVariant::Arrow);
    let before = engine.tools().clone();

    engine.undo();
    engine.redo();
    assert_eq!(engine.tools(), &before);
}

#[test]
fn test_pan_drag_cursor() {
    let mut engine = Engine::default();
    assert_eq!(engine.cursor_mode(), CursorMode::Grab);

    let down = InputEvent::PointerDown {
        button: egui::PointerButton::Primary,
    };
    let up = InputEvent::PointerUp {
        button: egui::PointerButton::Primary,
    };
    engine.handle_input(&down, FocusContext::Canvas);
    assert!(engine.is_pan_dragging());
    assert_eq!(engine.cursor_mode(), CursorMode::Grabbing);

    engine.handle_input(&up, FocusContext::Canvas);
    assert!(!engine.is_pan_dragging());
    assert_eq!(engine.cursor_mode(), CursorMode::Grab);
}

#[test]
fn test_switching_away_from_pan_ends_drag() {
    let mut engine = Engine::default();
    engine.handle_input(
        &InputEvent::PointerDown {
            button: egui::PointerButton::Primary,
        },
        FocusContext::Canvas,
    );
    engine.toggle_magnify();
    assert!(!engine.is_pan_dragging());
}
