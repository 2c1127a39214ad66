//! Core plumbing for the countdown panel
//!
//! This crate holds everything the counter app needs that is not about
//! counting: a Redux/Elm-style effect store, middleware, long-lived action
//! sources (subscriptions), the terminal event poller and the
//! event/action/render loop that ties them together.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **EffectStore**: State container whose reducer can declare side effects
//! - **Subscriptions**: Keyed timers and streams that feed actions back in
//! - **Component**: Pure UI elements that render based on props
//! - **Keybindings**: Context-aware key mapping
//!
//! # Basic Example
//!
//! ```ignore
//! use countdown_core::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! enum MyAction {
//!     Start,
//!     DidTick,
//! }
//!
//! enum Effect {
//!     StartTimer,
//! }
//!
//! fn reducer(state: &mut AppState, action: MyAction) -> DispatchResult<Effect> {
//!     match action {
//!         MyAction::Start => DispatchResult::changed_with(Effect::StartTimer),
//!         MyAction::DidTick => { state.count += 1; DispatchResult::changed() }
//!     }
//! }
//!
//! let mut store = EffectStore::new(AppState::default(), reducer);
//! let result = store.dispatch(MyAction::Start);
//! for effect in result.effects {
//!     // start the timer through `Subscriptions`
//! }
//! ```

pub mod action;
pub mod bus;
pub mod component;
pub mod effect;
pub mod event;
pub mod keybindings;
pub mod runtime;
pub mod store;
pub mod subscriptions;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Event system exports
pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use event::EventKind;

// Keybindings exports
pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};

// Middleware exports
pub use store::{LoggingMiddleware, Middleware};

// Effect exports
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};

// Runtime exports
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome};

// Subscription exports
pub use subscriptions::{SubKey, Subscriptions};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, key, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
    pub use crate::component::Component;
    pub use crate::effect::{
        DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware,
    };
    pub use crate::event::EventKind;
    pub use crate::keybindings::{
        format_key_for_display, parse_key_string, BindingContext, Keybindings,
    };
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::store::{LoggingMiddleware, Middleware};
    pub use crate::subscriptions::{SubKey, Subscriptions};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
