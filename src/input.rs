//! Frontend-neutral input events

use crate::sim::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Flap
    Jump,
    /// Numbered menu entry, zero-based
    Choice(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    /// Primary button press, in play-field coordinates
    PointerDown(Point),
}

/// True if any event asks to quit
pub fn wants_quit(events: &[InputEvent]) -> bool {
    events.iter().any(|e| matches!(e, InputEvent::Quit))
}
