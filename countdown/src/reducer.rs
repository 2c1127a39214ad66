//! Reducer - (state, action) -> changed + effects
//!
//! Every counter-affecting action becomes a `CounterPatch` merged through
//! [`apply_patch`], which also re-renders the changed panel fragments and
//! reschedules the tick timer when its projection moved.

use countdown_core::DispatchResult;
use tracing::{debug, info};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Button, CounterPatch, Field};
use crate::surface::{self, RenderSurface};
use crate::tick;
use crate::value::Value;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Counter commands =====
        Action::CounterPress(button) => {
            let patch = match button {
                Button::Start => CounterPatch::ticking(true),
                Button::Pause => CounterPatch::ticking(false),
                Button::SetTo => CounterPatch::count(Value::parse_int(&state.panel.set_to)),
                Button::Up => CounterPatch::count_up(true),
                Button::Down => CounterPatch::count_up(false),
                Button::Reset => {
                    let config = state.config;
                    state.panel.render_set_to(&config.initial_set_to.field_text());
                    return apply_patch(state, CounterPatch::from(config.initial)).mark_changed();
                }
            };
            apply_patch(state, patch)
        }

        Action::CounterDidTick { generation } => {
            if generation != state.tick_generation {
                debug!(generation, current = state.tick_generation, "Dropping stale tick");
                return DispatchResult::unchanged();
            }
            let patch = tick::tick_patch(&state.counter);
            apply_patch(state, patch)
        }

        // ===== Numeric fields =====
        Action::FieldEdit { field, text } => {
            let parsed = Value::parse_int(&text);
            let result = match field {
                Field::SetTo => DispatchResult::unchanged(),
                Field::TickSpeed => apply_patch(state, CounterPatch::tick_speed(parsed)),
                Field::CountDiff => apply_patch(state, CounterPatch::count_diff(parsed)),
            };
            // The field being edited keeps what was typed, not the parsed echo
            state.panel.set_text(field, text);
            result.mark_changed()
        }

        // ===== Focus =====
        Action::FocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            state.focus = state.focus.prev();
            DispatchResult::changed()
        }

        Action::FocusSet(focus) => {
            let changed = state.focus != focus;
            state.focus = focus;
            DispatchResult::from_changed(changed)
        }

        // Handled by the runtime's quit check
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Merge `patch` into the counter state and project the change.
///
/// Only fragments whose value changed are re-rendered.
pub fn apply_patch(state: &mut AppState, patch: CounterPatch) -> DispatchResult<Effect> {
    let prev = state.counter;
    if !state.counter.merge(&patch) {
        return DispatchResult::unchanged();
    }

    surface::render_changes(&prev, &state.counter, &mut state.panel);
    let mut result = DispatchResult::changed();

    let schedule = state.counter.schedule();
    if schedule != prev.schedule() {
        state.tick_generation += 1;
        let plan = schedule.plan();
        info!(
            ?plan,
            generation = state.tick_generation,
            is_ticking = schedule.is_ticking,
            tick_speed = %schedule.tick_speed,
            "Rescheduling tick timer"
        );
        result = result.with(Effect::TickReschedule {
            plan,
            generation: state.tick_generation,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::state::{CounterState, Focus};
    use crate::tick::TickPlan;

    fn press(state: &mut AppState, button: Button) -> DispatchResult<Effect> {
        reducer(state, Action::CounterPress(button))
    }

    fn tick(state: &mut AppState) -> DispatchResult<Effect> {
        let generation = state.tick_generation;
        reducer(state, Action::CounterDidTick { generation })
    }

    fn edit(state: &mut AppState, field: Field, text: &str) -> DispatchResult<Effect> {
        reducer(
            state,
            Action::FieldEdit {
                field,
                text: text.into(),
            },
        )
    }

    #[test]
    fn test_start_schedules_immediate_interval() {
        let mut state = AppState::default();

        let result = press(&mut state, Button::Start);

        assert!(result.changed);
        assert!(state.counter.is_ticking);
        assert_eq!(
            result.effects,
            vec![Effect::TickReschedule {
                plan: TickPlan::Every(Duration::from_millis(200)),
                generation: 1,
            }]
        );
    }

    #[test]
    fn test_start_twice_does_not_reschedule() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);

        let result = press(&mut state, Button::Start);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.tick_generation, 1);
    }

    #[test]
    fn test_pause_goes_idle() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);

        let result = press(&mut state, Button::Pause);

        assert_eq!(
            result.effects,
            vec![Effect::TickReschedule {
                plan: TickPlan::Idle,
                generation: 2,
            }]
        );
    }

    #[test]
    fn test_tick_steps_by_diff() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);
        edit(&mut state, Field::CountDiff, "5");

        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.counter.count, Value::new(10));
        assert_eq!(state.panel.display, "10");

        press(&mut state, Button::Down);
        tick(&mut state);
        assert_eq!(state.counter.count, Value::new(5));
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);
        let old = state.tick_generation;
        edit(&mut state, Field::TickSpeed, "50");
        assert_ne!(state.tick_generation, old);

        let result = reducer(&mut state, Action::CounterDidTick { generation: old });

        assert!(!result.changed);
        assert_eq!(state.counter.count, Value::new(0));
    }

    #[test]
    fn test_set_to_reads_field_text() {
        let mut state = AppState::default();
        edit(&mut state, Field::SetTo, "42");
        assert_eq!(state.counter.count, Value::new(0));

        press(&mut state, Button::SetTo);
        assert_eq!(state.counter.count, Value::new(42));
        assert_eq!(state.panel.display, "42");

        edit(&mut state, Field::SetTo, "x");
        press(&mut state, Button::SetTo);
        assert!(state.counter.count.is_nan());
        assert_eq!(state.panel.display, "NaN");
    }

    #[test]
    fn test_reset_restores_initial_state_and_set_to() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);
        press(&mut state, Button::Down);
        edit(&mut state, Field::TickSpeed, "10");
        edit(&mut state, Field::CountDiff, "7");
        edit(&mut state, Field::SetTo, "99");
        tick(&mut state);

        let result = press(&mut state, Button::Reset);

        assert!(result.changed);
        assert_eq!(state.counter, CounterState::default());
        assert_eq!(state.panel.set_to, "10");
        assert_eq!(state.panel.tick_speed, "200");
        assert_eq!(state.panel.count_diff, "1");
        assert_eq!(state.panel.display, "0");
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::TickReschedule {
                plan: TickPlan::Idle,
                ..
            }]
        ));
    }

    #[test]
    fn test_reset_rerenders_set_to_even_when_counter_unchanged() {
        let mut state = AppState::default();
        edit(&mut state, Field::SetTo, "55");

        let result = press(&mut state, Button::Reset);

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.panel.set_to, "10");
    }

    #[test]
    fn test_field_edit_keeps_raw_text() {
        let mut state = AppState::default();

        edit(&mut state, Field::TickSpeed, "12abc");
        assert_eq!(state.counter.tick_speed, Value::new(12));
        assert_eq!(state.panel.tick_speed, "12abc");

        let result = edit(&mut state, Field::CountDiff, "");
        assert!(result.changed);
        assert!(state.counter.count_diff.is_nan());
        assert_eq!(state.panel.count_diff, "");
    }

    #[test]
    fn test_speed_edit_while_ticking_reschedules() {
        let mut state = AppState::default();
        press(&mut state, Button::Start);

        let result = edit(&mut state, Field::TickSpeed, "-1");
        assert_eq!(
            result.effects,
            vec![Effect::TickReschedule {
                plan: TickPlan::Once,
                generation: 2,
            }]
        );

        let result = edit(&mut state, Field::TickSpeed, "0");
        assert_eq!(
            result.effects,
            vec![Effect::TickReschedule {
                plan: TickPlan::Every(Duration::from_millis(1)),
                generation: 3,
            }]
        );
    }

    #[test]
    fn test_speed_edit_while_paused_bumps_generation_only() {
        let mut state = AppState::default();

        let result = edit(&mut state, Field::TickSpeed, "300");

        assert_eq!(
            result.effects,
            vec![Effect::TickReschedule {
                plan: TickPlan::Idle,
                generation: 1,
            }]
        );
    }

    #[test]
    fn test_focus_actions() {
        let mut state = AppState::default();

        assert!(reducer(&mut state, Action::FocusNext).changed);
        assert_eq!(state.focus, Focus::Pause);

        assert!(reducer(&mut state, Action::FocusPrev).changed);
        assert_eq!(state.focus, Focus::Start);

        assert!(reducer(&mut state, Action::FocusSet(Focus::Down)).changed);
        assert!(!reducer(&mut state, Action::FocusSet(Focus::Down)).changed);
    }

    #[test]
    fn test_quit_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Quit);
        assert!(!result.changed);
    }
}
