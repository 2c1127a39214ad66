//! Middleware hooks around store dispatch

use crate::Action;

/// Hooks an [`EffectStoreWithMiddleware`](crate::EffectStoreWithMiddleware)
/// calls around every reducer run. They observe; they cannot change the action.
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);

    /// `state_changed` is the reducer's own verdict
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
///
/// Every dispatch is traced on the way in. Processed actions are logged at
/// debug level, except those whose category is listed in `quiet_categories`,
/// which stay at trace so timer ticks do not flood a debug log.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Categories demoted to trace level
    pub quiet_categories: Vec<&'static str>,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demote a category to trace level
    pub fn quiet(mut self, category: &'static str) -> Self {
        self.quiet_categories.push(category);
        self
    }

    fn is_quiet<A: Action>(&self, action: &A) -> bool {
        action
            .category()
            .is_some_and(|c| self.quiet_categories.contains(&c))
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        tracing::trace!(action = %action.name(), "Dispatching action");
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.is_quiet(action) {
            tracing::trace!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        } else {
            tracing::debug!(
                action = ?action,
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
