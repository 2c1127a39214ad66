pub mod counter_display;
pub mod counter_panel;
pub mod help_bar;
pub mod number_field;
pub mod push_button;
pub mod status_line;

// Re-export core Component trait
pub use countdown_core::Component;

pub use counter_display::{CounterDisplay, CounterDisplayProps};
pub use counter_panel::{CounterPanel, CounterPanelProps, PANEL_HEIGHT, PANEL_WIDTH};
pub use help_bar::{HelpBar, HelpBarProps};
pub use number_field::{NumberField, NumberFieldProps};
pub use push_button::{PushButton, PushButtonProps};
pub use status_line::{StatusLine, StatusLineProps};
