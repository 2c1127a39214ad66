//! Render tests using RenderHarness

use countdown::components::{Component, CounterPanel, CounterPanelProps};
use countdown::keys::default_keybindings;
use countdown::reducer;
use countdown::state::{AppState, Button, Field, Focus};
use countdown::ui::CounterUi;
use countdown::Action;
use countdown_core::testing::*;

fn render_panel(state: &AppState) -> String {
    let mut render = RenderHarness::new(72, 16);
    let mut panel = CounterPanel::new();
    let keybindings = default_keybindings();

    render.render_to_string_plain(|frame| {
        let area = frame.area();
        let props = CounterPanelProps {
            state,
            keybindings: &keybindings,
        };
        panel.render(frame, area, props);
    })
}

#[test]
fn test_render_initial_panel() {
    let output = render_panel(&AppState::default());

    assert!(output.contains("Countdown"), "Should show title");
    assert!(output.contains("│0│"), "Should show count in a cell");
    for label in ["Start", "Pause", "Set To", "Reset", "Count Up", "Count Down"] {
        assert!(output.contains(label), "Should show {label} button");
    }
    assert!(output.contains("200"), "Should show tick speed");
    assert!(output.contains("10"), "Should show set-to value");
    assert!(output.contains("paused"), "Should show paused status");
}

#[test]
fn test_render_negative_and_nan_counts() {
    let mut state = AppState::default();
    reducer(&mut state, Action::CounterPress(Button::Down));
    reducer(&mut state, Action::CounterDidTick { generation: 0 });
    let output = render_panel(&state);
    assert!(output.contains("│-││1│"), "Should show -1 cell by cell");

    reducer(
        &mut state,
        Action::FieldEdit {
            field: Field::SetTo,
            text: "abc".into(),
        },
    );
    reducer(&mut state, Action::CounterPress(Button::SetTo));
    let output = render_panel(&state);
    assert!(output.contains("│N││a││N│"), "Should show NaN");
}

#[test]
fn test_render_ticking_status() {
    let mut state = AppState::default();
    reducer(&mut state, Action::CounterPress(Button::Start));

    let output = render_panel(&state);

    assert!(output.contains("ticking"));
    assert!(output.contains("every 200 ms"));
}

#[test]
fn test_help_bar_follows_focus() {
    let mut state = AppState::default();
    let output = render_panel(&state);
    assert!(output.contains("start"), "Panel hints when a button has focus");

    state.focus = Focus::TickSpeedField;
    let output = render_panel(&state);
    assert!(output.contains("done"), "Field hints when a field has focus");
    assert!(!output.contains("S start"));
}

#[test]
fn test_ui_centers_panel_in_large_terminal() {
    let mut render = RenderHarness::new(100, 30);
    let mut ui = CounterUi::new(default_keybindings());
    let state = AppState::default();

    let output = render.render_to_string_plain(|frame| {
        let area = frame.area();
        ui.render(frame, area, &state);
    });

    let first_row = output
        .lines()
        .position(|line| line.contains("Countdown"))
        .unwrap();
    assert!(first_row > 0, "Panel should be vertically centered");
    assert!(output.contains("Count Down"));
}
