//! The whole panel: display, buttons, fields, status and help
//!
//! Owns one child component per on-screen element so that clicks can be
//! hit-tested against where each child was last drawn.

use countdown_core::{EventKind, Keybindings};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};

use super::{
    Component, CounterDisplay, CounterDisplayProps, HelpBar, HelpBarProps, NumberField,
    NumberFieldProps, PushButton, PushButtonProps, StatusLine, StatusLineProps,
};
use crate::action::Action;
use crate::keys::KeyContext;
use crate::state::{AppState, Button, Field};

/// Rows the panel needs to show everything
pub const PANEL_HEIGHT: u16 = 16;

pub const PANEL_WIDTH: u16 = 72;

pub struct CounterPanelProps<'a> {
    pub state: &'a AppState,
    pub keybindings: &'a Keybindings<KeyContext>,
}

pub struct CounterPanel {
    display: CounterDisplay,
    buttons: Vec<PushButton>,
    fields: Vec<NumberField>,
    status: StatusLine,
    help: HelpBar,
}

const BUTTONS: [Button; 6] = [
    Button::Start,
    Button::Pause,
    Button::SetTo,
    Button::Reset,
    Button::Up,
    Button::Down,
];

const FIELDS: [Field; 3] = [Field::SetTo, Field::TickSpeed, Field::CountDiff];

impl Default for CounterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterPanel {
    pub fn new() -> Self {
        Self {
            display: CounterDisplay,
            buttons: BUTTONS.into_iter().map(PushButton::new).collect(),
            fields: FIELDS.into_iter().map(NumberField::new).collect(),
            status: StatusLine,
            help: HelpBar,
        }
    }

    fn button_index(button: Button) -> usize {
        BUTTONS.iter().position(|b| *b == button).unwrap_or(0)
    }

    fn field_index(field: Field) -> usize {
        FIELDS.iter().position(|f| *f == field).unwrap_or(0)
    }

    fn render_button(&mut self, frame: &mut Frame, area: Rect, button: Button, state: &AppState) {
        let props = PushButtonProps {
            is_focused: state.focus.button() == Some(button),
        };
        self.buttons[Self::button_index(button)].render(frame, area, props);
    }

    fn render_field(&mut self, frame: &mut Frame, area: Rect, field: Field, state: &AppState) {
        let props = NumberFieldProps {
            value: state.panel.text(field),
            is_focused: state.focus.field() == Some(field),
        };
        self.fields[Self::field_index(field)].render(frame, area, props);
    }

    fn button_width(&self, button: Button) -> Constraint {
        Constraint::Length(self.buttons[Self::button_index(button)].width())
    }
}

impl Component<Action> for CounterPanel {
    type Props<'a> = CounterPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let mut actions = Vec::new();

        match event {
            EventKind::Key(_) => {
                if let Some(field) = state.focus.field() {
                    let props = NumberFieldProps {
                        value: state.panel.text(field),
                        is_focused: true,
                    };
                    actions.extend(self.fields[Self::field_index(field)].handle_event(event, props));
                }
            }
            EventKind::Mouse(_) => {
                for button in &mut self.buttons {
                    actions.extend(button.handle_event(event, PushButtonProps { is_focused: false }));
                }
                for (field, input) in FIELDS.into_iter().zip(&mut self.fields) {
                    let props = NumberFieldProps {
                        value: state.panel.text(field),
                        is_focused: state.focus.field() == Some(field),
                    };
                    actions.extend(input.handle_event(event, props));
                }
            }
            EventKind::Resize(..) => {}
        }

        actions
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Countdown ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [display, row_set, row_dir, row_fields, status, _, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.display.render(
            frame,
            display,
            CounterDisplayProps {
                text: &state.panel.display,
                is_ticking: state.counter.is_ticking,
            },
        );

        // Start, Pause, Set To and its field
        let [start, pause, set_to, set_to_field] = Layout::horizontal([
            self.button_width(Button::Start),
            self.button_width(Button::Pause),
            self.button_width(Button::SetTo),
            Constraint::Min(10),
        ])
        .spacing(1)
        .areas(row_set);
        self.render_button(frame, start, Button::Start, state);
        self.render_button(frame, pause, Button::Pause, state);
        self.render_button(frame, set_to, Button::SetTo, state);
        self.render_field(frame, set_to_field, Field::SetTo, state);

        let [reset, up, down, _] = Layout::horizontal([
            self.button_width(Button::Reset),
            self.button_width(Button::Up),
            self.button_width(Button::Down),
            Constraint::Min(0),
        ])
        .spacing(1)
        .areas(row_dir);
        self.render_button(frame, reset, Button::Reset, state);
        self.render_button(frame, up, Button::Up, state);
        self.render_button(frame, down, Button::Down, state);

        let [tick_speed, count_diff] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(1)
                .areas(row_fields);
        self.render_field(frame, tick_speed, Field::TickSpeed, state);
        self.render_field(frame, count_diff, Field::CountDiff, state);

        self.status.render(
            frame,
            status,
            StatusLineProps {
                counter: &state.counter,
            },
        );
        self.help.render(
            frame,
            help,
            HelpBarProps {
                keybindings: props.keybindings,
                context: KeyContext::for_focus(state.focus),
            },
        );
    }
}
