//! Top-level event mapping and rendering
//!
//! Keys go through the keybindings first; whatever is left over is typed
//! into the focused field. Mouse events go to the panel for hit-testing.

use countdown_core::{Component, EventKind, EventOutcome, Keybindings};
use crossterm::event::KeyEventKind;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};

use crate::action::Action;
use crate::components::{CounterPanel, CounterPanelProps, PANEL_HEIGHT, PANEL_WIDTH};
use crate::keys::{Command, KeyContext};
use crate::state::AppState;

pub struct CounterUi {
    panel: CounterPanel,
    keybindings: Keybindings<KeyContext>,
}

impl CounterUi {
    pub fn new(keybindings: Keybindings<KeyContext>) -> Self {
        Self {
            panel: CounterPanel::new(),
            keybindings,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [row] = Layout::vertical([Constraint::Length(PANEL_HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(PANEL_WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        let props = CounterPanelProps {
            state,
            keybindings: &self.keybindings,
        };
        self.panel.render(frame, panel, props);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(..) => return EventOutcome::needs_render(),
            EventKind::Key(key) if key.kind != KeyEventKind::Press => {
                return EventOutcome::ignored();
            }
            _ => {}
        }

        if event.is_interrupt() {
            return EventOutcome::action(Action::Quit);
        }

        if let EventKind::Key(key) = event {
            let context = KeyContext::for_focus(state.focus);
            if let Some(command) = self
                .keybindings
                .get_command(*key, context)
                .and_then(Command::from_name)
            {
                return self.run_command(command, state).into();
            }
        }

        let props = CounterPanelProps {
            state,
            keybindings: &self.keybindings,
        };
        EventOutcome::from_actions(self.panel.handle_event(event, props))
    }

    fn run_command(&self, command: Command, state: &AppState) -> Option<Action> {
        match command {
            Command::Quit => Some(Action::Quit),
            Command::FocusNext => Some(Action::FocusNext),
            Command::FocusPrev => Some(Action::FocusPrev),
            Command::Press(button) => Some(Action::CounterPress(button)),
            Command::PressFocused => state.focus.button().map(Action::CounterPress),
        }
    }
}
