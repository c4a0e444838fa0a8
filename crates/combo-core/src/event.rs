use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Terminal events delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
///
/// Each variant wraps the corresponding [`crossterm::event::Event`] payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The key event, if this is a key *press* (releases and repeats on
    /// terminals that report them are skipped).
    pub fn key_press(&self) -> Option<KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
            _ => None,
        }
    }

    /// `(column, row)` of a left-button press.
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            TerminalEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}
