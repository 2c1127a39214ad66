//! Terminal event polling

use crate::event::EventKind;
use crossterm::event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// The crossterm events the panel reacts to; focus and paste are dropped
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Forward terminal input to `tx` from a background task.
///
/// Every `loop_sleep` the task reads up to a batch of pending events, waiting
/// at most `poll_timeout` for each. It stops when `cancel_token` fires, after
/// swallowing any unread input, or when `tx` has no receiver left.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    // Leave no keystrokes behind for the shell
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => EventKind::Mouse(mouse),
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::char_key;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    #[test]
    fn test_process_raw_event_key() {
        let kind = process_raw_event(RawEvent::Key(char_key('s')));
        assert!(matches!(kind, EventKind::Key(k) if k == char_key('s')));
    }

    #[test]
    fn test_process_raw_event_mouse() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(click)) {
            EventKind::Mouse(mouse) => assert_eq!((mouse.column, mouse.row), (3, 7)),
            other => panic!("Expected Mouse event, got {other:?}"),
        }
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }
}
