//! Stores whose reducers declare side effects
//!
//! An effect reducer returns both whether state changed and a list of
//! declarative effects:
//!
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> DispatchResult<E>
//! ```
//!
//! Effects describe work (start a timer, cancel a timer) without doing it.
//! The runtime hands them to an effect handler after the reducer returns, so
//! the reducer itself stays a plain function of state and action.
//!
//! ```ignore
//! enum Effect {
//!     Reschedule { period_ms: u64 },
//! }
//!
//! fn reducer(state: &mut State, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::SpeedChange(ms) if ms != state.speed => {
//!             state.speed = ms;
//!             DispatchResult::changed_with(Effect::Reschedule { period_ms: ms })
//!         }
//!         _ => DispatchResult::unchanged(),
//!     }
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::store::Middleware;

/// What one dispatch did: whether state moved, and what must happen next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Drives the runtime's redraw
    pub changed: bool,
    /// Handed to the effect handler in order
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Build from a change flag.
    #[inline]
    pub fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Force a redraw even when the reducer's own checks saw no change
    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store whose reducer returns [`DispatchResult<E>`].
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Run the reducer once; effects are returned, not executed
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// [`EffectStore`] wrapped in a [`Middleware`].
///
/// Middleware sees every action before and after the reducer runs, along
/// with the state change indicator, but not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}
