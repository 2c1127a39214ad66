//! Single-line numeric input with cursor
//!
//! The field does not validate: whatever is typed is emitted as the new text
//! and the reducer parses it. Enter and Esc are not handled here; they are
//! bound to focus movement.

use countdown_core::EventKind;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::Field;

pub struct NumberFieldProps<'a> {
    /// Current text
    pub value: &'a str,
    pub is_focused: bool,
}

pub struct NumberField {
    field: Field,
    /// Cursor position (byte index)
    cursor: usize,
    was_focused: bool,
    area: Rect,
}

impl NumberField {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            cursor: 0,
            was_focused: false,
            area: Rect::default(),
        }
    }

    /// Clamp the cursor, and jump to the end when focus just arrived
    fn sync(&mut self, props: &NumberFieldProps<'_>) {
        if props.is_focused && !self.was_focused {
            self.cursor = props.value.len();
        }
        self.was_focused = props.is_focused;
        self.cursor = self.cursor.min(props.value.len());
        while !props.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn edit(&self, text: String) -> Option<Action> {
        Some(Action::FieldEdit {
            field: self.field,
            text,
        })
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut text = String::with_capacity(value.len() + c.len_utf8());
        text.push_str(&value[..self.cursor]);
        text.push(c);
        text.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        text
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let text = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(text)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl Component<Action> for NumberField {
    type Props<'a> = NumberFieldProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if let EventKind::Mouse(mouse) = event {
            let clicked = mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && self.area.contains(Position::new(mouse.column, mouse.row));
            return clicked.then(|| Action::FocusSet(self.field.focus()));
        }

        if !props.is_focused {
            return None;
        }
        self.sync(&props);
        let value = props.value;

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    self.edit(String::new())
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let text = self.insert(value, c);
                self.edit(text)
            }
            KeyCode::Backspace => self.backspace(value).and_then(|text| self.edit(text)),
            KeyCode::Delete => self.delete(value).and_then(|text| self.edit(text)),
            KeyCode::Left => {
                self.move_left(value);
                None
            }
            KeyCode::Right => {
                self.move_right(value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;
        self.sync(&props);

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", self.field.label()));
        let inner = block.inner(area);

        frame.render_widget(Paragraph::new(props.value).block(block), area);

        if props.is_focused {
            let cursor_x = inner.x + props.value[..self.cursor].chars().count() as u16;
            if cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::testing::{ctrl_key, key, RenderHarness};

    fn focused(value: &str) -> NumberFieldProps<'_> {
        NumberFieldProps {
            value,
            is_focused: true,
        }
    }

    fn press(field: &mut NumberField, value: &str, k: &str) -> Vec<Action> {
        field
            .handle_event(&EventKind::Key(key(k)), focused(value))
            .into_iter()
            .collect()
    }

    fn edited(text: &str) -> Vec<Action> {
        vec![Action::FieldEdit {
            field: Field::TickSpeed,
            text: text.into(),
        }]
    }

    #[test]
    fn test_typing_appends_at_end_on_focus() {
        let mut field = NumberField::new(Field::TickSpeed);
        assert_eq!(press(&mut field, "20", "0"), edited("200"));
    }

    #[test]
    fn test_cursor_movement_and_edit() {
        let mut field = NumberField::new(Field::TickSpeed);

        assert!(press(&mut field, "200", "home").is_empty());
        assert_eq!(press(&mut field, "200", "1"), edited("1200"));
        assert!(press(&mut field, "1200", "right").is_empty());
        assert_eq!(press(&mut field, "1200", "backspace"), edited("100"));
        assert_eq!(press(&mut field, "100", "delete"), edited("10"));
        assert!(press(&mut field, "10", "end").is_empty());
        assert!(press(&mut field, "10", "delete").is_empty());
    }

    #[test]
    fn test_backspace_at_start() {
        let mut field = NumberField::new(Field::TickSpeed);
        press(&mut field, "5", "home");
        assert!(press(&mut field, "5", "backspace").is_empty());
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = NumberField::new(Field::TickSpeed);
        let actions: Vec<_> = field
            .handle_event(&EventKind::Key(ctrl_key('u')), focused("200"))
            .into_iter()
            .collect();
        assert_eq!(actions, edited(""));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut field = NumberField::new(Field::TickSpeed);
        let props = NumberFieldProps {
            value: "1",
            is_focused: false,
        };
        let actions: Vec<_> = field
            .handle_event(&EventKind::Key(key("2")), props)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_shows_label_and_value() {
        let mut field = NumberField::new(Field::CountDiff);
        let mut harness = RenderHarness::new(20, 3);

        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            field.render(frame, area, focused("-3"))
        });

        assert!(output.contains("Count Diff"));
        assert!(output.contains("-3"));
    }
}
