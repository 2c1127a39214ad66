//! The count, one framed cell per character

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;

pub struct CounterDisplayProps<'a> {
    /// Display text, e.g. `"-12"` or `"NaN"`
    pub text: &'a str,
    pub is_ticking: bool,
}

#[derive(Default)]
pub struct CounterDisplay;

/// Three rows of text drawing a box around every character of `text`
pub fn cell_rows(text: &str) -> [String; 3] {
    let mut rows = [String::new(), String::new(), String::new()];
    for c in text.chars() {
        rows[0].push_str("┌─┐");
        rows[1].push('│');
        rows[1].push(c);
        rows[1].push('│');
        rows[2].push_str("└─┘");
    }
    rows
}

impl Component<Action> for CounterDisplay {
    type Props<'a> = CounterDisplayProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let frame_style = Style::default().fg(Color::Rgb(80, 80, 100));
        let digit_style = if props.is_ticking {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::White).bold()
        };

        let [top, middle, bottom] = cell_rows(props.text);
        let middle: Vec<Span> = middle
            .chars()
            .map(|c| {
                if c == '│' {
                    Span::styled(c.to_string(), frame_style)
                } else {
                    Span::styled(c.to_string(), digit_style)
                }
            })
            .collect();

        let lines = vec![
            Line::styled(top, frame_style),
            Line::from(middle),
            Line::styled(bottom, frame_style),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rows() {
        let [top, middle, bottom] = cell_rows("-7");
        assert_eq!(top, "┌─┐┌─┐");
        assert_eq!(middle, "│-││7│");
        assert_eq!(bottom, "└─┘└─┘");
    }
}
