//! Input-to-intent mapping.
//!
//! One physical keyboard serves global navigation (undo, zoom), the tool
//! palette mnemonics and free text entry. Which of those a key press means is
//! decided by walking [`SHORTCUT_RULES`] in order; the first rule that answers
//! wins and nothing after it runs, so a chord can never fire twice.
use egui::{Key, PointerButton};

use super::{FocusContext, InputEvent, KeyPress};
use crate::command::Command;
use crate::tool::{ShapeVariant, ToolKind};
use crate::view::ZoomLimits;

/// The slice of engine state the rules need to decide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchContext {
    pub edit_mode: bool,
    pub focus: FocusContext,
    pub active_tool: ToolKind,
    pub is_pan_dragging: bool,
    pub zoom: ZoomLimits,
}

/// Outcome of routing one input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// Run this engine operation
    Command(Command),
    /// A rule claimed the event and deliberately did nothing
    Suppressed,
    /// No rule applies; the host may use the event itself
    Unhandled,
}

/// One entry of the precedence table
pub struct ShortcutRule {
    pub name: &'static str,
    pub apply: fn(&KeyPress, &DispatchContext) -> Option<Dispatch>,
}

impl std::fmt::Debug for ShortcutRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutRule").field("name", &self.name).finish()
    }
}

/// Keyboard shortcut precedence, highest first.
pub const SHORTCUT_RULES: &[ShortcutRule] = &[
    ShortcutRule {
        name: "undo-redo",
        apply: undo_redo,
    },
    ShortcutRule {
        name: "zoom",
        apply: zoom,
    },
    ShortcutRule {
        name: "magnify",
        apply: magnify,
    },
    ShortcutRule {
        name: "edit-gate",
        apply: edit_gate,
    },
    ShortcutRule {
        name: "palette",
        apply: palette,
    },
];

/// Tool palette mnemonics, only reachable in edit mode.
const PALETTE: &[(Key, Command)] = &[
    (Key::V, Command::SetTool(ToolKind::Select)),
    (Key::P, Command::SetTool(ToolKind::Pen)),
    (Key::H, Command::SetTool(ToolKind::Highlight)),
    (Key::E, Command::SetTool(ToolKind::Eraser)),
    (Key::T, Command::SetTool(ToolKind::Text)),
    (Key::R, Command::SelectShape(ShapeVariant::Rectangle)),
    (Key::C, Command::SelectShape(ShapeVariant::Circle)),
    (Key::L, Command::SelectShape(ShapeVariant::Line)),
    (Key::A, Command::SelectShape(ShapeVariant::Arrow)),
    (Key::OpenBracket, Command::NudgeLineWidth(-1.0)),
    (Key::CloseBracket, Command::NudgeLineWidth(1.0)),
];

fn undo_redo(press: &KeyPress, _ctx: &DispatchContext) -> Option<Dispatch> {
    if !press.modifiers.command {
        return None;
    }
    match press.key {
        Key::Z if press.modifiers.shift => Some(Dispatch::Command(Command::Redo)),
        Key::Z => Some(Dispatch::Command(Command::Undo)),
        Key::Y => Some(Dispatch::Command(Command::Redo)),
        _ => None,
    }
}

fn zoom(press: &KeyPress, ctx: &DispatchContext) -> Option<Dispatch> {
    if !press.modifiers.command {
        return None;
    }
    match press.key {
        Key::Equals | Key::Plus => Some(Dispatch::Command(Command::ZoomBy(ctx.zoom.step))),
        Key::Minus => Some(Dispatch::Command(Command::ZoomBy(-ctx.zoom.step))),
        _ => None,
    }
}

fn magnify(press: &KeyPress, ctx: &DispatchContext) -> Option<Dispatch> {
    let plain = press.modifiers.is_none();
    (press.key == Key::M && plain && !ctx.focus.is_text_input())
        .then_some(Dispatch::Command(Command::ToggleMagnify))
}

/// Everything below this rule is palette territory: off limits outside edit
/// mode and while the user is typing. Only shortcut keys are claimed, so
/// navigation keys still reach the host.
fn edit_gate(press: &KeyPress, ctx: &DispatchContext) -> Option<Dispatch> {
    let shortcut_key = press.key == Key::M || PALETTE.iter().any(|(key, _)| *key == press.key);
    let gated = !ctx.edit_mode || ctx.focus.is_text_input();
    (shortcut_key && gated).then_some(Dispatch::Suppressed)
}

fn palette(press: &KeyPress, _ctx: &DispatchContext) -> Option<Dispatch> {
    let modifiers = press.modifiers;
    if modifiers.command || modifiers.ctrl || modifiers.alt {
        return None;
    }
    PALETTE
        .iter()
        .find(|(key, _)| *key == press.key)
        .map(|(_, command)| Dispatch::Command(*command))
}

/// Route a key press through the precedence table.
pub fn dispatch_key(press: &KeyPress, ctx: &DispatchContext) -> Dispatch {
    for rule in SHORTCUT_RULES {
        if let Some(outcome) = (rule.apply)(press, ctx) {
            log::trace!("{:?} matched rule {}", press.key, rule.name);
            return outcome;
        }
    }
    Dispatch::Unhandled
}

/// Route any input event to at most one engine operation.
pub fn dispatch(event: &InputEvent, ctx: &DispatchContext) -> Dispatch {
    match event {
        InputEvent::Key(press) => dispatch_key(press, ctx),
        InputEvent::Wheel { delta_y, modifiers } => {
            if modifiers.command && delta_y.is_finite() {
                Dispatch::Command(Command::ZoomBy(-delta_y * ctx.zoom.wheel_factor))
            } else {
                Dispatch::Unhandled
            }
        }
        InputEvent::PointerDown {
            button: PointerButton::Primary,
        } if ctx.active_tool == ToolKind::Pan => Dispatch::Command(Command::BeginPanDrag),
        InputEvent::PointerUp {
            button: PointerButton::Primary,
        } if ctx.is_pan_dragging => Dispatch::Command(Command::EndPanDrag),
        InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => Dispatch::Unhandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    fn ctx(edit_mode: bool) -> DispatchContext {
        DispatchContext {
            edit_mode,
            focus: FocusContext::Canvas,
            active_tool: ToolKind::Select,
            is_pan_dragging: false,
            zoom: ZoomLimits::default(),
        }
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = SHORTCUT_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["undo-redo", "zoom", "magnify", "edit-gate", "palette"]);
    }

    #[test]
    fn chorded_palette_key_is_left_alone() {
        let press = KeyPress::new(Key::P, Modifiers::CTRL);
        assert_eq!(dispatch_key(&press, &ctx(true)), Dispatch::Unhandled);
    }

    #[test]
    fn shifted_magnify_is_not_a_toggle() {
        let press = KeyPress::new(Key::M, Modifiers::SHIFT);
        assert_eq!(dispatch_key(&press, &ctx(true)), Dispatch::Unhandled);
    }

    #[test]
    fn wheel_without_modifier_scrolls() {
        let wheel = InputEvent::Wheel {
            delta_y: 120.0,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(dispatch(&wheel, &ctx(false)), Dispatch::Unhandled);
    }

    #[test]
    fn gate_claims_only_shortcut_keys() {
        let view = ctx(false);
        assert_eq!(dispatch_key(&KeyPress::plain(Key::E), &view), Dispatch::Suppressed);
        assert_eq!(dispatch_key(&KeyPress::plain(Key::ArrowRight), &view), Dispatch::Unhandled);
        assert_eq!(dispatch_key(&KeyPress::plain(Key::Delete), &view), Dispatch::Unhandled);
    }
}
