//! Keyed, long-lived action sources
//!
//! A subscription is a spawned task that keeps sending actions into the
//! runtime's action channel until it is cancelled or the channel closes.
//! Registering a subscription under a key that is already in use aborts the
//! previous task first, so a key always names at most one running source.
//!
//! ```ignore
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut subs = countdown_core::Subscriptions::new(tx);
//!
//! // Emit now, then every 200ms
//! subs.interval_immediate("tick", Duration::from_millis(200), || Action::Tick);
//!
//! // Restart with a new period: the 200ms timer is aborted
//! subs.interval_immediate("tick", Duration::from_millis(50), || Action::Tick);
//!
//! subs.cancel(&"tick".into());
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::Action;

/// Name a subscription is registered, replaced and cancelled under
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubKey(String);

impl SubKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SubKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SubKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The running action sources, one task per key
pub struct Subscriptions<A> {
    handles: HashMap<SubKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> Subscriptions<A>
where
    A: Action,
{
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit an action immediately, then once every `duration`.
    ///
    /// Replaces any subscription registered under the same key.
    pub fn interval_immediate<F>(
        &mut self,
        key: impl Into<SubKey>,
        duration: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> A + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        debug!(key = key.name(), period_ms = duration.as_millis() as u64, "Starting interval");
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(duration);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    // Channel closed, stop the subscription
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Forward every item of `stream` as an action.
    ///
    /// Replaces any subscription registered under the same key.
    pub fn stream<S>(&mut self, key: impl Into<SubKey>, stream: S) -> &mut Self
    where
        S: Stream<Item = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        debug!(key = key.name(), "Starting stream");
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::pin!(stream);
            while let Some(action) = stream.next().await {
                if tx.send(action).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Cancel a subscription by key. No-op for unknown keys.
    pub fn cancel(&mut self, key: &SubKey) {
        if let Some(handle) = self.handles.remove(key) {
            debug!(key = key.name(), "Cancelling subscription");
            handle.abort();
        }
    }

    /// Abort every source; used when the runtime shuts down.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    /// Whether the source under `key` is still running.
    ///
    /// A finite stream stops being active once it has been drained.
    pub fn is_active(&self, key: &SubKey) -> bool {
        self.handles
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for Subscriptions<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
