//! Side effects declared by the reducer

use countdown_core::EffectContext;
use tracing::debug;

use crate::action::Action;
use crate::tick::{self, TickPlan};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Replace the tick timer; its ticks carry `generation`
    TickReschedule { plan: TickPlan, generation: u64 },
}

pub fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::TickReschedule { plan, generation } => {
            debug!(?plan, generation, "Applying tick plan");
            tick::apply_plan(plan, generation, ctx.subscriptions());
        }
    }
}
