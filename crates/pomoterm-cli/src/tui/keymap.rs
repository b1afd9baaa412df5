use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pomoterm_core::Command;

/// Map a key press to an operator command.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('s' | ' ') => Some(Command::StartPause),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('R') => Some(Command::HardReset),
        KeyCode::Char('b' | 'n') => Some(Command::Advance),
        KeyCode::Char('h') => Some(Command::ToggleHint),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
