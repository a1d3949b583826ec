//! Key mapping from terminal events to named game inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Physical keys the game listens to, after alias folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Left,
    Right,
    Down,
}

impl Key {
    /// Fold a key code and its letter aliases (wasd, hjkl) into a game key.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(Key::Up),
            KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Key::Right),
            KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Key::Down),
            _ => None,
        }
    }

    pub fn down_name(self) -> &'static str {
        match self {
            Key::Space => " _down",
            Key::Up => "ArrowUp_down",
            Key::Left => "ArrowLeft_down",
            Key::Right => "ArrowRight_down",
            Key::Down => "ArrowDown_down",
        }
    }

    pub fn up_name(self) -> &'static str {
        match self {
            Key::Space => " _up",
            Key::Up => "ArrowUp_up",
            Key::Left => "ArrowLeft_up",
            Key::Right => "ArrowRight_up",
            Key::Down => "ArrowDown_up",
        }
    }
}

/// Name of the input a key event produces, or `None` for keys the game
/// ignores. Presses and auto-repeats are `_down`; releases are `_up`.
pub fn input_name(key: KeyEvent) -> Option<&'static str> {
    let game_key = Key::from_code(key.code)?;
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    Some(match key.kind {
        KeyEventKind::Release => game_key.up_name(),
        KeyEventKind::Press | KeyEventKind::Repeat => game_key.down_name(),
    })
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key starts a game waiting in the begin screen.
pub fn is_start(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Check if key asks for a new game.
pub fn is_restart(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
