//! A bordered, clickable button

use countdown_core::EventKind;
use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::Button;

pub struct PushButtonProps {
    pub is_focused: bool,
}

/// Remembers where it was last drawn so clicks can be hit-tested
pub struct PushButton {
    button: Button,
    area: Rect,
}

impl PushButton {
    pub fn new(button: Button) -> Self {
        Self {
            button,
            area: Rect::default(),
        }
    }

    /// Columns needed to show the label inside the border
    pub fn width(&self) -> u16 {
        self.button.label().len() as u16 + 4
    }
}

impl Component<Action> for PushButton {
    type Props<'a> = PushButtonProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self.area.contains(Position::new(mouse.column, mouse.row)) =>
            {
                Some(Action::CounterPress(self.button))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;

        let (border, label) = if props.is_focused {
            (
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Cyan).bold(),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default())
        };

        let paragraph = Paragraph::new(self.button.label())
            .style(label)
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(paragraph, area);
    }
}
