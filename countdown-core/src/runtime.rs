//! Event/action/render loop
//!
//! [`EffectRuntime`] owns the action channel, the store and the
//! subscriptions, and runs the loop every app would otherwise wire by hand:
//!
//! 1. render if the last dispatch changed state
//! 2. wait for either a terminal event or an action
//! 3. events are mapped to actions and queued
//! 4. actions are dispatched; declared effects go to the effect handler

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
use crate::event::EventKind;
use crate::store::Middleware;
use crate::subscriptions::Subscriptions;
use crate::Action;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Sleep between poll cycles, roughly one frame
const POLL_LOOP_SLEEP: Duration = Duration::from_millis(16);

/// What a terminal event turned into: actions to queue, and whether the
/// screen must be redrawn even if no state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Queued on the action channel in order
    pub actions: Vec<A>,
    /// Redraw on the next loop turn (e.g. after a resize)
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Redraw without dispatching anything
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions, e.g. a `Component::handle_event` result.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// Effect store interface used by [`EffectRuntime`].
pub trait EffectStoreLike<S, A: Action, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    fn state(&self) -> &S;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

/// What an effect handler may touch: the action channel and the keyed
/// subscriptions. It never sees the state.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    subscriptions: &'a mut Subscriptions<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Build a context from its parts (runtime internals and tests).
    pub fn new(
        action_tx: &'a mpsc::UnboundedSender<A>,
        subscriptions: &'a mut Subscriptions<A>,
    ) -> Self {
        Self {
            action_tx,
            subscriptions,
        }
    }

    /// Queue an action; dropped silently if the runtime has stopped
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        self.subscriptions
    }
}

/// Drives a store from terminal events and its own action channel until a
/// quit action arrives.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    should_render: bool,
    subscriptions: Subscriptions<A>,
    _state: std::marker::PhantomData<S>,
    _effect: std::marker::PhantomData<E>,
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Wrap `store`; the first loop turn always renders.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            should_render: true,
            subscriptions,
            _state: std::marker::PhantomData,
            _effect: std::marker::PhantomData,
        }
    }

    /// Poll the terminal and dispatch actions until `should_quit` accepts one.
    ///
    /// The quit action is not dispatched. On exit the event poller is
    /// cancelled and every subscription aborted.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            POLL_LOOP_SLEEP,
            cancel_token.clone(),
        );
        info!("Runtime started");

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext::new(&self.action_tx, &mut self.subscriptions);
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        info!("Runtime stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Press,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Press"
        }
    }

    #[test]
    fn test_event_outcome_conversions() {
        let outcome: EventOutcome<TestAction> = Some(TestAction::Press).into();
        assert_eq!(outcome.actions, vec![TestAction::Press]);
        assert!(!outcome.needs_render);

        let outcome: EventOutcome<TestAction> = None.into();
        assert_eq!(outcome, EventOutcome::ignored());

        let outcome = EventOutcome::from_actions([TestAction::Press, TestAction::Press]).with_render();
        assert_eq!(outcome.actions.len(), 2);
        assert!(outcome.needs_render);

        assert!(EventOutcome::<TestAction>::needs_render().actions.is_empty());
    }

    #[tokio::test]
    async fn test_effect_context_emits_into_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx.clone());
        let mut ctx = EffectContext::new(&tx, &mut subs);

        ctx.emit(TestAction::Press);
        assert!(ctx.subscriptions().is_empty());
        assert_eq!(rx.recv().await, Some(TestAction::Press));
    }
}
