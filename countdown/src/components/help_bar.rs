//! Key hints built from the active keybindings
//!
//! Rebinding a command in the keybindings file changes the hint too.

use countdown_core::{format_key_for_display, Keybindings};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::keys::{Command, KeyContext};

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings<KeyContext>,
    pub context: KeyContext,
}

#[derive(Default)]
pub struct HelpBar;

const PANEL_HINTS: &[(&str, &str)] = &[
    (Command::START, "start"),
    (Command::PAUSE, "pause"),
    (Command::SET_TO, "set"),
    (Command::RESET, "reset"),
    (Command::UP, "up"),
    (Command::DOWN, "down"),
    (Command::FOCUS_NEXT, "focus"),
    (Command::QUIT, "quit"),
];

const FIELD_HINTS: &[(&str, &str)] = &[
    (Command::FOCUS_NEXT, "done"),
    (Command::FOCUS_PREV, "back"),
    (Command::QUIT, "quit"),
];

/// `(key, label)` pairs for the commands that currently have a key
pub fn hints(
    keybindings: &Keybindings<KeyContext>,
    context: KeyContext,
) -> Vec<(String, &'static str)> {
    let table = match context {
        KeyContext::Panel => PANEL_HINTS,
        KeyContext::Field => FIELD_HINTS,
    };
    table
        .iter()
        .filter_map(|(command, label)| {
            keybindings
                .first_key(command, context)
                .map(|key| (format_key_for_display(key), *label))
        })
        .collect()
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = hints(props.keybindings, props.context)
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::default_keybindings;

    #[test]
    fn test_panel_hints_follow_bindings() {
        let mut kb = default_keybindings();
        let panel = hints(&kb, KeyContext::Panel);
        assert_eq!(panel[0], ("S".to_string(), "start"));
        assert!(panel.contains(&("Tab".to_string(), "focus")));

        kb.add(KeyContext::Panel, Command::START, &["ctrl+g"]);
        assert_eq!(hints(&kb, KeyContext::Panel)[0], ("^G".to_string(), "start"));
    }

    #[test]
    fn test_field_hints() {
        let kb = default_keybindings();
        let field = hints(&kb, KeyContext::Field);
        assert_eq!(
            field,
            vec![
                ("Enter".to_string(), "done"),
                ("Shift+Tab".to_string(), "back"),
                ("^C".to_string(), "quit"),
            ]
        );
    }
}
