//! Countdown - a ticking counter panel for the terminal
//!
//! Commands (start, pause, set to, reset, count up/down, tick speed and
//! count diff edits) and timer ticks become partial updates of a single
//! [`state::CounterState`], merged in arrival order by the [`reducer`].
//! After every merge the changed fields are rendered onto the panel and the
//! tick timer is rescheduled if `is_ticking` or `tick_speed` moved.

pub mod action;
pub mod components;
pub mod config;
pub mod effect;
pub mod keys;
pub mod reducer;
pub mod state;
pub mod surface;
pub mod tick;
pub mod ui;
pub mod value;

pub use action::Action;
pub use effect::{handle_effect, Effect};
pub use reducer::reducer;
pub use state::{AppState, CounterConfig, CounterPatch, CounterState};
pub use value::Value;
