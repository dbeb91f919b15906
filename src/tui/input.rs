//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::signal::SignalKind;

/// A user command decoded from one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextTab,
    PrevTab,
    CursorUp,
    CursorDown,
    /// Toggle the sort lock.
    ToggleLock,
    Quit,
    /// Send a signal to the highlighted process.
    Signal(SignalKind),
}

/// Maps a key event to a command. Unbound keys and key releases map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('l') => Command::ToggleLock,
        KeyCode::Char('k') => Command::Signal(SignalKind::Kill),
        KeyCode::Char('i') => Command::Signal(SignalKind::Interrupt),

        // Tab navigation
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('2') => Command::NextTab,
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('1') => Command::PrevTab,

        // Row navigation
        KeyCode::Up | KeyCode::Char('w') => Command::CursorUp,
        KeyCode::Down | KeyCode::Char('s') => Command::CursorDown,

        _ => return None,
    };
    Some(command)
}

/// Key hints for the footer.
pub const KEY_HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("←/→", "tab"),
    ("↑/↓", "select"),
    ("l", "lock"),
    ("k", "kill"),
    ("i", "interrupt"),
];
