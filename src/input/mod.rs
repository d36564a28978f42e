//! Input module - keyboard handling for game controls
//!
//! Keyboard stands in for pointer drag: arrows move the ghost cursor,
//! number keys / Tab pick a tray slot, Enter or Space commits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map keyboard input to game actions
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Ghost cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(GameAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(GameAction::CursorDown),

        // Tray
        KeyCode::Char('1') => Some(GameAction::SelectSlot(0)),
        KeyCode::Char('2') => Some(GameAction::SelectSlot(1)),
        KeyCode::Char('3') => Some(GameAction::SelectSlot(2)),
        KeyCode::Tab => Some(GameAction::CycleSlot),

        // Placement
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Commit),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
