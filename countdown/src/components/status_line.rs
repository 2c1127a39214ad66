use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::CounterState;
use crate::tick::TickPlan;

pub struct StatusLineProps<'a> {
    pub counter: &'a CounterState,
}

#[derive(Default)]
pub struct StatusLine;

/// How often the counter moves, in words
pub fn describe_plan(plan: TickPlan) -> String {
    match plan {
        TickPlan::Idle => "stopped".to_string(),
        TickPlan::Once => "one tick".to_string(),
        TickPlan::Every(period) => format!("every {} ms", period.as_millis()),
    }
}

impl Component<Action> for StatusLine {
    type Props<'a> = StatusLineProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let counter = props.counter;
        let state = if counter.is_ticking {
            Span::styled("▶ ticking", Style::default().fg(Color::Green).bold())
        } else {
            Span::styled("⏸ paused", Style::default().fg(Color::Yellow).bold())
        };
        let direction = if counter.count_up { "up" } else { "down" };
        let plan = describe_plan(counter.schedule().plan());

        let line = Line::from(vec![
            state,
            Span::styled(
                format!("  counting {direction} by {}  ", counter.count_diff),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(plan, Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), area);
    }
}
