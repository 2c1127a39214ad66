//! The rendering surface seen from the state side
//!
//! The reducer never formats text for the screen directly. After each merged
//! patch it projects the change onto a `RenderSurface`, calling only the
//! render operations whose field changed.

use crate::state::CounterState;
use crate::value::Value;

/// Render operations the panel exposes to the state machine
pub trait RenderSurface {
    fn render_count(&mut self, count: Value);
    fn render_tick_speed(&mut self, tick_speed: Value);
    fn render_count_diff(&mut self, count_diff: Value);
    fn render_set_to(&mut self, value: &str);
}

/// Render every state-driven fragment (startup).
pub fn render_all(state: &CounterState, surface: &mut impl RenderSurface) {
    surface.render_count(state.count);
    surface.render_tick_speed(state.tick_speed);
    surface.render_count_diff(state.count_diff);
}

/// Render the fragments whose field differs between `prev` and `next`.
///
/// Returns whether anything was rendered.
pub fn render_changes(
    prev: &CounterState,
    next: &CounterState,
    surface: &mut impl RenderSurface,
) -> bool {
    let mut rendered = false;
    if prev.count != next.count {
        surface.render_count(next.count);
        rendered = true;
    }
    if prev.tick_speed != next.tick_speed {
        surface.render_tick_speed(next.tick_speed);
        rendered = true;
    }
    if prev.count_diff != next.count_diff {
        surface.render_count_diff(next.count_diff);
        rendered = true;
    }
    rendered
}
