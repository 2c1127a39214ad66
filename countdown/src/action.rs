//! Actions - every way the panel state can change

use crate::state::{Button, Field, Focus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// A panel button was pressed (key, mouse or keybinding)
    CounterPress(Button),
    /// The tick timer fired; `generation` identifies the timer
    CounterDidTick { generation: u64 },
    /// A numeric field's text changed
    FieldEdit { field: Field, text: String },

    FocusNext,
    FocusPrev,
    FocusSet(Focus),

    Quit,
}

impl countdown_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::CounterPress(_) => "CounterPress",
            Action::CounterDidTick { .. } => "CounterDidTick",
            Action::FieldEdit { .. } => "FieldEdit",
            Action::FocusNext => "FocusNext",
            Action::FocusPrev => "FocusPrev",
            Action::FocusSet(_) => "FocusSet",
            Action::Quit => "Quit",
        }
    }

    fn category(&self) -> Option<&'static str> {
        match self {
            Action::CounterPress(_) => Some("counter"),
            Action::CounterDidTick { .. } => Some("tick"),
            Action::FieldEdit { .. } => Some("field"),
            Action::FocusNext | Action::FocusPrev | Action::FocusSet(_) => Some("focus"),
            Action::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::Action as _;

    #[test]
    fn test_names_and_categories() {
        let press = Action::CounterPress(Button::Start);
        assert_eq!(press.name(), "CounterPress");
        assert_eq!(press.category(), Some("counter"));

        let tick = Action::CounterDidTick { generation: 3 };
        assert_eq!(tick.category(), Some("tick"));

        assert_eq!(Action::FocusSet(Focus::Reset).category(), Some("focus"));
        assert_eq!(Action::Quit.category(), None);
    }
}
