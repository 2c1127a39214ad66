//! Tick timer derived from the counter state
//!
//! Only the `(is_ticking, tick_speed)` projection matters here. The reducer
//! compares the projection before and after every patch and asks for a
//! reschedule when it moved; this module turns the projection into a timer
//! plan and installs it as a keyed subscription, replacing the previous one.

use std::time::Duration;

use countdown_core::{SubKey, Subscriptions};

use crate::action::Action;
use crate::state::{CounterPatch, CounterState};
use crate::value::Value;

/// Subscription key of the tick timer
pub const TICK_SUBSCRIPTION: &str = "tick";

/// Smallest timer period the runtime supports
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// The part of the counter state the timer depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSchedule {
    pub is_ticking: bool,
    pub tick_speed: Value,
}

/// What the timer should do for a schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPlan {
    /// No ticks
    Idle,
    /// One immediate tick, then nothing
    Once,
    /// An immediate tick, then one per period
    Every(Duration),
}

impl TickSchedule {
    pub fn plan(&self) -> TickPlan {
        if !self.is_ticking {
            return TickPlan::Idle;
        }
        match self.tick_speed.get() {
            Some(ms) if ms > 0 => TickPlan::Every(Duration::from_millis(ms.unsigned_abs())),
            Some(0) => TickPlan::Every(MIN_PERIOD),
            _ => TickPlan::Once,
        }
    }
}

/// Patch produced by one tick, read against the latest state
pub fn tick_patch(state: &CounterState) -> CounterPatch {
    CounterPatch::count(state.count.step(state.count_diff, state.count_up))
}

/// Install `plan` as the tick subscription. Every tick it emits carries
/// `generation`.
pub fn apply_plan(plan: TickPlan, generation: u64, subscriptions: &mut Subscriptions<Action>) {
    let tick = move || Action::CounterDidTick { generation };
    match plan {
        TickPlan::Idle => subscriptions.cancel(&SubKey::from(TICK_SUBSCRIPTION)),
        TickPlan::Once => {
            subscriptions.stream(TICK_SUBSCRIPTION, tokio_stream::once(tick()));
        }
        TickPlan::Every(period) => {
            subscriptions.interval_immediate(TICK_SUBSCRIPTION, period, tick);
        }
    }
}
