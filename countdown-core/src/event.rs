//! Terminal events as seen by components

use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// New width and height in cells
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C, delivered regardless of focus
    pub fn is_interrupt(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                use crossterm::event::KeyCode;
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c'))
            }
            _ => false,
        }
    }
}
