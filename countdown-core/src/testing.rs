//! Test utilities
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+c")`)
//! - [`TestHarness`]: State plus an action channel for capturing emitted actions
//! - [`RenderHarness`]: Render into an in-memory terminal and read it back as text
//! - `assert_emitted!` / `assert_not_emitted!` / `count_emitted!` over drained actions
//!
//! ```ignore
//! use countdown_core::testing::{key, TestHarness};
//!
//! let mut harness = TestHarness::<CounterState, Action>::new(CounterState::default());
//! let mut subs = Subscriptions::new(harness.sender());
//! subs.interval_immediate("tick", Duration::from_millis(10), || Action::Tick);
//!
//! assert_emitted!(harness.drain_emitted(), Action::Tick);
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::keybindings::parse_key_string;
use crate::Action;

/// A key press from the same notation the bindings use.
///
/// Panics on notation `parse_key_string` rejects.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Generic test harness: a state value plus an action channel.
///
/// Hand [`sender`](Self::sender) to whatever emits actions (subscriptions,
/// effect handlers), then [`drain_emitted`](Self::drain_emitted) to inspect
/// what arrived.
pub struct TestHarness<S, A: Action> {
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Give this to subscriptions or an `EffectContext`.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Queue an action as if a background task had sent it
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Everything queued so far, without waiting
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next emitted action.
    pub async fn next_emitted(&mut self) -> Option<A> {
        self.rx.recv().await
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Renders into a ratatui `TestBackend` of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("TestBackend terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render(&mut self, render_fn: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(render_fn)
            .unwrap_or_else(|e| panic!("TestBackend draw: {e}"));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return it as plain text (no styles).
    pub fn render_to_string_plain(&mut self, render_fn: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(render_fn))
    }
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Fails unless some action in the list matches the pattern.
///
/// ```ignore
/// assert_emitted!(harness.drain_emitted(), Action::CounterDidTick { generation: 2 });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Fails if any action in the list matches the pattern.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
