//! Key mapping from terminal keys to well inputs.

use crate::types::InputKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the well input it drives.
pub fn map_key(code: KeyCode) -> Option<InputKind> {
    match code {
        // Directions
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputKind::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputKind::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputKind::Down)
        }
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char(' ') => Some(InputKind::Up),

        // Buttons
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(InputKind::A),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(InputKind::B),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(InputKind::C),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
