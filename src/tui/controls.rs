//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::sim::clock::Clock;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key<C: Clock>(app: &mut App<C>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Tab | KeyCode::Down => app.select_next(),
        KeyCode::BackTab | KeyCode::Up => app.select_prev(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.adjust(1),
        KeyCode::Char('-') | KeyCode::Left => app.adjust(-1),
        KeyCode::Char('e') => app.toggle_ev(),
        KeyCode::Char('r') => app.reroll(),
        _ => {}
    }
}
