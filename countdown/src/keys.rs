//! Keybinding contexts and commands

use countdown_core::{BindingContext, Keybindings};

use crate::state::{Button, Focus};

/// Which binding table is active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// A button has focus
    Panel,
    /// A numeric field has focus; plain characters go to the field
    Field,
}

impl KeyContext {
    pub fn for_focus(focus: Focus) -> Self {
        if focus.field().is_some() {
            KeyContext::Field
        } else {
            KeyContext::Panel
        }
    }
}

impl BindingContext for KeyContext {
    fn name(&self) -> &'static str {
        match self {
            KeyContext::Panel => "panel",
            KeyContext::Field => "field",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "panel" => Some(KeyContext::Panel),
            "field" => Some(KeyContext::Field),
            _ => None,
        }
    }
}

/// Commands that keys can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    FocusNext,
    FocusPrev,
    /// Press a specific button regardless of focus
    Press(Button),
    /// Press whichever button has focus
    PressFocused,
}

impl Command {
    pub const QUIT: &'static str = "quit";
    pub const FOCUS_NEXT: &'static str = "focus.next";
    pub const FOCUS_PREV: &'static str = "focus.prev";
    pub const START: &'static str = "counter.start";
    pub const PAUSE: &'static str = "counter.pause";
    pub const SET_TO: &'static str = "counter.set_to";
    pub const RESET: &'static str = "counter.reset";
    pub const UP: &'static str = "counter.up";
    pub const DOWN: &'static str = "counter.down";
    pub const PRESS_FOCUSED: &'static str = "button.press";

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            Self::QUIT => Command::Quit,
            Self::FOCUS_NEXT => Command::FocusNext,
            Self::FOCUS_PREV => Command::FocusPrev,
            Self::START => Command::Press(Button::Start),
            Self::PAUSE => Command::Press(Button::Pause),
            Self::SET_TO => Command::Press(Button::SetTo),
            Self::RESET => Command::Press(Button::Reset),
            Self::UP => Command::Press(Button::Up),
            Self::DOWN => Command::Press(Button::Down),
            Self::PRESS_FOCUSED => Command::PressFocused,
            _ => return None,
        })
    }
}

pub fn default_keybindings() -> Keybindings<KeyContext> {
    let mut kb = Keybindings::new();

    kb.add_global(Command::QUIT, &["ctrl+c"]);
    kb.add_global(Command::FOCUS_NEXT, &["tab"]);
    kb.add_global(Command::FOCUS_PREV, &["shift+tab"]);

    kb.add(KeyContext::Panel, Command::START, &["s"]);
    kb.add(KeyContext::Panel, Command::PAUSE, &["p"]);
    kb.add(KeyContext::Panel, Command::SET_TO, &["t"]);
    kb.add(KeyContext::Panel, Command::RESET, &["r"]);
    kb.add(KeyContext::Panel, Command::UP, &["u"]);
    kb.add(KeyContext::Panel, Command::DOWN, &["d"]);
    kb.add(KeyContext::Panel, Command::PRESS_FOCUSED, &["enter", "space"]);
    kb.add(KeyContext::Panel, Command::QUIT, &["q", "esc"]);

    kb.add(KeyContext::Field, Command::FOCUS_NEXT, &["enter", "esc"]);

    kb
}
