//! Application state - single source of truth
//!
//! `CounterState` is the authoritative counter record. It only ever changes by
//! merging a `CounterPatch`, one at a time, in arrival order. Everything else
//! in `AppState` describes the panel that shows it.

use crate::surface::{self, RenderSurface};
use crate::tick::TickSchedule;
use crate::value::Value;

pub const DEFAULT_TICK_SPEED_MS: i64 = 200;

/// Distance between the initial count and the initial set-to value
pub const SET_TO_OFFSET: i64 = 10;

/// The counter record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterState {
    pub is_ticking: bool,
    pub count: Value,
    pub count_up: bool,
    /// Milliseconds between ticks
    pub tick_speed: Value,
    pub count_diff: Value,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            is_ticking: false,
            count: Value::new(0),
            count_up: true,
            tick_speed: Value::new(DEFAULT_TICK_SPEED_MS),
            count_diff: Value::new(1),
        }
    }
}

impl CounterState {
    /// Shallow merge: every field the patch carries overwrites ours.
    ///
    /// Returns whether any field actually changed.
    pub fn merge(&mut self, patch: &CounterPatch) -> bool {
        let before = *self;
        if let Some(is_ticking) = patch.is_ticking {
            self.is_ticking = is_ticking;
        }
        if let Some(count) = patch.count {
            self.count = count;
        }
        if let Some(count_up) = patch.count_up {
            self.count_up = count_up;
        }
        if let Some(tick_speed) = patch.tick_speed {
            self.tick_speed = tick_speed;
        }
        if let Some(count_diff) = patch.count_diff {
            self.count_diff = count_diff;
        }
        *self != before
    }

    /// The projection the tick timer is derived from
    pub fn schedule(&self) -> TickSchedule {
        TickSchedule {
            is_ticking: self.is_ticking,
            tick_speed: self.tick_speed,
        }
    }
}

/// A partial update of [`CounterState`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterPatch {
    pub is_ticking: Option<bool>,
    pub count: Option<Value>,
    pub count_up: Option<bool>,
    pub tick_speed: Option<Value>,
    pub count_diff: Option<Value>,
}

impl CounterPatch {
    pub fn ticking(is_ticking: bool) -> Self {
        Self {
            is_ticking: Some(is_ticking),
            ..Self::default()
        }
    }

    pub fn count(count: Value) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn count_up(count_up: bool) -> Self {
        Self {
            count_up: Some(count_up),
            ..Self::default()
        }
    }

    pub fn tick_speed(tick_speed: Value) -> Self {
        Self {
            tick_speed: Some(tick_speed),
            ..Self::default()
        }
    }

    pub fn count_diff(count_diff: Value) -> Self {
        Self {
            count_diff: Some(count_diff),
            ..Self::default()
        }
    }
}

/// A full state as a patch touching every field
impl From<CounterState> for CounterPatch {
    fn from(state: CounterState) -> Self {
        Self {
            is_ticking: Some(state.is_ticking),
            count: Some(state.count),
            count_up: Some(state.count_up),
            tick_speed: Some(state.tick_speed),
            count_diff: Some(state.count_diff),
        }
    }
}

/// Startup values; reset returns here
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    pub initial: CounterState,
    /// What the set-to field shows at startup and after reset
    pub initial_set_to: Value,
}

impl Default for CounterConfig {
    fn default() -> Self {
        let initial = CounterState::default();
        Self {
            initial,
            initial_set_to: initial.count.step(Value::new(SET_TO_OFFSET), true),
        }
    }
}

/// Buttons on the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Start,
    Pause,
    SetTo,
    Reset,
    Up,
    Down,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "Start",
            Button::Pause => "Pause",
            Button::SetTo => "Set To",
            Button::Reset => "Reset",
            Button::Up => "Count Up",
            Button::Down => "Count Down",
        }
    }
}

/// Numeric input fields on the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    SetTo,
    TickSpeed,
    CountDiff,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::SetTo => "Value",
            Field::TickSpeed => "Tick Speed",
            Field::CountDiff => "Count Diff",
        }
    }

    pub fn focus(self) -> Focus {
        match self {
            Field::SetTo => Focus::SetToField,
            Field::TickSpeed => Focus::TickSpeedField,
            Field::CountDiff => Focus::CountDiffField,
        }
    }
}

/// Focusable elements, in panel order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Focus {
    #[default]
    Start,
    Pause,
    SetTo,
    SetToField,
    Reset,
    Up,
    Down,
    TickSpeedField,
    CountDiffField,
}

impl Focus {
    const ORDER: [Focus; 9] = [
        Focus::Start,
        Focus::Pause,
        Focus::SetTo,
        Focus::SetToField,
        Focus::Reset,
        Focus::Up,
        Focus::Down,
        Focus::TickSpeedField,
        Focus::CountDiffField,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }

    pub fn button(self) -> Option<Button> {
        match self {
            Focus::Start => Some(Button::Start),
            Focus::Pause => Some(Button::Pause),
            Focus::SetTo => Some(Button::SetTo),
            Focus::Reset => Some(Button::Reset),
            Focus::Up => Some(Button::Up),
            Focus::Down => Some(Button::Down),
            _ => None,
        }
    }

    pub fn field(self) -> Option<Field> {
        match self {
            Focus::SetToField => Some(Field::SetTo),
            Focus::TickSpeedField => Some(Field::TickSpeed),
            Focus::CountDiffField => Some(Field::CountDiff),
            _ => None,
        }
    }
}

/// What the panel currently shows
///
/// The counter display and the three numeric fields. Field text is owned
/// here because it is user input: it only follows the counter state when a
/// render call overwrites it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    pub display: String,
    pub set_to: String,
    pub tick_speed: String,
    pub count_diff: String,
}

impl Panel {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::SetTo => &self.set_to,
            Field::TickSpeed => &self.tick_speed,
            Field::CountDiff => &self.count_diff,
        }
    }

    pub fn set_text(&mut self, field: Field, text: String) {
        match field {
            Field::SetTo => self.set_to = text,
            Field::TickSpeed => self.tick_speed = text,
            Field::CountDiff => self.count_diff = text,
        }
    }
}

impl RenderSurface for Panel {
    fn render_count(&mut self, count: Value) {
        self.display = count.to_string();
    }

    fn render_tick_speed(&mut self, tick_speed: Value) {
        self.tick_speed = tick_speed.field_text();
    }

    fn render_count_diff(&mut self, count_diff: Value) {
        self.count_diff = count_diff.field_text();
    }

    fn render_set_to(&mut self, value: &str) {
        self.set_to = value.to_string();
    }
}

/// Everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    pub counter: CounterState,
    pub panel: Panel,
    pub focus: Focus,
    pub config: CounterConfig,
    /// Bumped on every tick reschedule; ticks carrying an older value are stale
    pub tick_generation: u64,
}

impl AppState {
    pub fn new(config: CounterConfig) -> Self {
        let mut panel = Panel::default();
        surface::render_all(&config.initial, &mut panel);
        panel.render_set_to(&config.initial_set_to.field_text());

        Self {
            counter: config.initial,
            panel,
            focus: Focus::default(),
            config,
            tick_generation: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}
