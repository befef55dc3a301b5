//! Crossterm polling translated into the small event vocabulary the pages
//! understand.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Char(char),
    Backspace,
    Enter,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    /// Ctrl+C. Always quits, regardless of page or filter state.
    ForceQuit,
    Resize(u16, u16),
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(TuiEvent::Char(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Enter),
                (_, KeyCode::Esc) => Some(TuiEvent::Esc),
                (_, KeyCode::Tab) => Some(TuiEvent::Tab),
                (_, KeyCode::BackTab) => Some(TuiEvent::BackTab),
                (_, KeyCode::Up) => Some(TuiEvent::Up),
                (_, KeyCode::Down) => Some(TuiEvent::Down),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

/// Poll for an event without blocking. Used to drain the queue before the
/// next draw.
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}
