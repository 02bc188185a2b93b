use egui::{Key, Modifiers};
use pdf_annotate::command::Command;
use pdf_annotate::input::{
    Dispatch, DispatchContext, FocusContext, InputEvent, KeyPress, dispatch, dispatch_key,
};
use pdf_annotate::tool::{ShapeVariant, ToolKind};
use pdf_annotate::view::ZoomLimits;
use pdf_annotate::{DocumentSource, Engine, EngineConfig};

fn context(edit_mode: bool, focus: FocusContext) -> DispatchContext {
    DispatchContext {
        edit_mode,
        focus,
        active_tool: if edit_mode { ToolKind::Select } else { ToolKind::Pan },
        is_pan_dragging: false,
        zoom: ZoomLimits::default(),
    }
}

fn editing_engine() -> Engine {
    let mut engine = Engine::new(EngineConfig {
        start_in_edit_mode: true,
        ..Default::default()
    });
    engine
        .load_document(&DocumentSource::new("a.pdf", b"%PDF-1.7".to_vec()))
        .unwrap();
    engine
}

fn key(engine: &mut Engine, press: KeyPress) -> Dispatch {
    engine.handle_input(&InputEvent::Key(press), FocusContext::Canvas)
}

#[test]
fn test_undo_redo_chords() {
    let ctx = context(false, FocusContext::Canvas);
    let shift_command = Modifiers::COMMAND | Modifiers::SHIFT;

    assert_eq!(dispatch_key(&KeyPress::command(Key::Z), &ctx), Dispatch::Command(Command::Undo));
    assert_eq!(
        dispatch_key(&KeyPress::new(Key::Z, shift_command), &ctx),
        Dispatch::Command(Command::Redo)
    );
    assert_eq!(dispatch_key(&KeyPress::command(Key::Y), &ctx), Dispatch::Command(Command::Redo));
}

#[test]
fn test_global_chords_beat_text_focus() {
    let ctx = context(true, FocusContext::TextInput);
    assert_eq!(dispatch_key(&KeyPress::command(Key::Z), &ctx), Dispatch::Command(Command::Undo));
    assert_eq!(
        dispatch_key(&KeyPress::command(Key::Plus), &ctx),
        Dispatch::Command(Command::ZoomBy(0.1))
    );
}

#[test]
fn test_text_focus_suppresses_palette_and_magnify() {
    let ctx = context(true, FocusContext::TextInput);
    assert_eq!(dispatch_key(&KeyPress::plain(Key::E), &ctx), Dispatch::Suppressed);
    assert_eq!(dispatch_key(&KeyPress::plain(Key::M), &ctx), Dispatch::Suppressed);

    let mut engine = editing_engine();
    let before = engine.tools().active_tool();
    engine.handle_input(&InputEvent::Key(KeyPress::plain(Key::E)), FocusContext::TextInput);
    assert_eq!(engine.tools().active_tool(), before);
}

#[test]
fn test_view_mode_suppresses_palette_but_not_magnify() {
    let ctx = context(false, FocusContext::Canvas);
    assert_eq!(dispatch_key(&KeyPress::plain(Key::P), &ctx), Dispatch::Suppressed);
    assert_eq!(
        dispatch_key(&KeyPress::plain(Key::M), &ctx),
        Dispatch::Command(Command::ToggleMagnify)
    );
}

#[test]
fn test_palette_mnemonics() {
    let mut engine = editing_engine();
    let tools = [
        (Key::P, ToolKind::Pen),
        (Key::H, ToolKind::Highlight),
        (Key::E, ToolKind::Eraser),
        (Key::T, ToolKind::Text),
        (Key::V, ToolKind::Select),
    ];
    for (k, tool) in tools {
        key(&mut engine, KeyPress::plain(k));
        assert_eq!(engine.tools().active_tool(), tool);
    }

    let shapes = [
        (Key::R, ShapeVariant::Rectangle),
        (Key::C, ShapeVariant::Circle),
        (Key::L, ShapeVariant::Line),
        (Key::A, ShapeVariant::Arrow),
    ];
    for (k, variant) in shapes {
        key(&mut engine, KeyPress::plain(k));
        assert_eq!(engine.tools().active_tool(), ToolKind::Shape);
        assert_eq!(engine.tools().active_shape(), variant);
    }
}

#[test]
fn test_palette_ignores_command_chords() {
    let ctx = context(true, FocusContext::Canvas);
    assert_eq!(dispatch_key(&KeyPress::command(Key::P), &ctx), Dispatch::Unhandled);
    assert_eq!(dispatch_key(&KeyPress::plain(Key::Q), &ctx), Dispatch::Unhandled);
}

#[test]
fn test_line_width_stays_clamped() {
    let mut engine = editing_engine();
    for _ in 0..250 {
        key(&mut engine, KeyPress::plain(Key::CloseBracket));
        let width = engine.tools().properties().line_width;
        assert!((1.0..=100.0).contains(&width));
    }
    assert_eq!(engine.tools().properties().line_width, 100.0);

    for _ in 0..250 {
        key(&mut engine, KeyPress::plain(Key::OpenBracket));
        let width = engine.tools().properties().line_width;
        assert!((1.0..=100.0).contains(&width));
    }
    assert_eq!(engine.tools().properties().line_width, 1.0);
}

#[test]
fn test_scale_stays_clamped_for_shortcuts_and_wheel() {
    let mut engine = editing_engine();
    for _ in 0..100 {
        key(&mut engine, KeyPress::command(Key::Equals));
        assert!((0.25..=4.0).contains(&engine.view().scale()));
    }
    assert_eq!(engine.view().scale(), 4.0);

    for _ in 0..100 {
        key(&mut engine, KeyPress::command(Key::Minus));
        assert!((0.25..=4.0).contains(&engine.view().scale()));
    }
    assert_eq!(engine.view().scale(), 0.25);

    // Negative delta is scrolling up, which zooms in
    let wheel_in = InputEvent::Wheel {
        delta_y: -500.0,
        modifiers: Modifiers::COMMAND,
    };
    for _ in 0..50 {
        engine.handle_input(&wheel_in, FocusContext::Canvas);
        assert!((0.25..=4.0).contains(&engine.view().scale()));
    }
    assert_eq!(engine.view().scale(), 4.0);
}

#[test]
fn test_plain_wheel_is_left_to_the_viewer() {
    let ctx = context(true, FocusContext::Canvas);
    let wheel = InputEvent::Wheel {
        delta_y: 120.0,
        modifiers: Modifiers::NONE,
    };
    assert_eq!(dispatch(&wheel, &ctx), Dispatch::Unhandled);

    let zoom_out = InputEvent::Wheel {
        delta_y: 100.0,
        modifiers: Modifiers::COMMAND,
    };
    match dispatch(&zoom_out, &ctx) {
        Dispatch::Command(Command::ZoomBy(delta)) => assert!((delta + 0.1).abs() < 1e-6),
        other => panic!("expected zoom out, got {other:?}"),
    }
}

#[test]
fn test_undo_shortcut_drives_history() {
    let mut engine = editing_engine();
    let gesture = pdf_annotate::Gesture::stroke(
        1,
        pdf_annotate::AnnotationKind::Pen,
        vec![egui::pos2(1.0, 1.0), egui::pos2(2.0, 2.0)],
    );
    engine.commit_gesture(gesture).unwrap();
    assert_eq!(engine.current().len(), 1);

    key(&mut engine, KeyPress::command(Key::Z));
    assert!(engine.current().is_empty());
    key(&mut engine, KeyPress::command(Key::Y));
    assert_eq!(engine.current().len(), 1);
}

#[test]
fn test_config_cannot_widen_clamps() {
    let json = r#"{
        "line_width": { "min": 0.5, "max": 500 },
        "zoom": { "min": 0.05, "max": 20 },
        "start_in_edit_mode": true
    }"#;
    let mut engine = Engine::new(EngineConfig::from_json_str(json).unwrap());
    engine
        .load_document(&DocumentSource::new("a.pdf", b"%PDF-1.7".to_vec()))
        .unwrap();

    for _ in 0..600 {
        key(&mut engine, KeyPress::plain(Key::CloseBracket));
    }
    assert_eq!(engine.tools().properties().line_width, 100.0);

    for _ in 0..100 {
        key(&mut engine, KeyPress::command(Key::Equals));
    }
    assert_eq!(engine.view().scale(), 4.0);
    for _ in 0..100 {
        key(&mut engine, KeyPress::command(Key::Minus));
    }
    assert_eq!(engine.view().scale(), 0.25);
}
