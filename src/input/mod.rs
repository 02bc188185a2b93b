use egui::{Context, Key, Modifiers, PointerButton};

mod router;
pub use router::{Dispatch, DispatchContext, SHORTCUT_RULES, ShortcutRule, dispatch, dispatch_key};

/// A key press together with the modifiers held at the time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key with no modifiers held
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key chorded with the platform command key (ctrl, or cmd on mac)
    pub fn command(key: Key) -> Self {
        Self::new(key, Modifiers::COMMAND)
    }
}

/// Raw input the engine cares about, already detached from egui's frame state
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyPress),
    /// Vertical wheel movement, with the modifiers held while scrolling
    Wheel { delta_y: f32, modifiers: Modifiers },
    PointerDown { button: PointerButton },
    PointerUp { button: PointerButton },
}

/// Where keyboard focus sits when an event arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// Page canvas or nothing in particular
    #[default]
    Canvas,
    /// A text input or text area owns the keyboard
    TextInput,
}

impl FocusContext {
    pub fn is_text_input(self) -> bool {
        self == Self::TextInput
    }
}

/// Handles converting raw egui input into our InputEvents
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Focus as egui sees it: any focused text edit wants the keyboard
    pub fn focus(ctx: &Context) -> FocusContext {
        if ctx.wants_keyboard_input() {
            FocusContext::TextInput
        } else {
            FocusContext::Canvas
        }
    }

    /// Collect this frame's key presses, wheel movement and pointer buttons.
    ///
    /// Wheel deltas follow the DOM convention (positive = scrolling down),
    /// which is the opposite sign of egui's scroll delta.
    pub fn process_input(&self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::Key(KeyPress::new(*key, *modifiers)));
                }
            }

            let delta_y = -input.raw_scroll_delta.y;
            if delta_y != 0.0 {
                events.push(InputEvent::Wheel {
                    delta_y,
                    modifiers: input.modifiers,
                });
            }

            for button in [PointerButton::Primary, PointerButton::Secondary] {
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown { button });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp { button });
                }
            }
        });

        events
    }
}
