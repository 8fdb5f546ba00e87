use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Heading;

/// What a key press means for the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Heading),
    Restart,
    Quit,
    None,
}

/// Maps key presses to game commands
///
/// Steering only applies while the snake is alive, and restarting only
/// from the game-over screen. Quitting works in both.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, game_over: bool) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(heading) = Self::heading_for(key.code) {
            return if game_over {
                KeyAction::None
            } else {
                KeyAction::Turn(heading)
            };
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => KeyAction::Quit,
            KeyCode::Enter if game_over => KeyAction::Restart,
            KeyCode::Char(c) if game_over && c.eq_ignore_ascii_case(&'r') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    /// Arrow keys and WASD, either case
    fn heading_for(code: KeyCode) -> Option<Heading> {
        match code {
            KeyCode::Up => Some(Heading::Up),
            KeyCode::Down => Some(Heading::Down),
            KeyCode::Left => Some(Heading::Left),
            KeyCode::Right => Some(Heading::Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Heading::Up),
                's' => Some(Heading::Down),
                'a' => Some(Heading::Left),
                'd' => Some(Heading::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
