use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::bindings::{normalize_key, BindingAction, KeyBindings};
use crate::game::{Command, Direction};

/// Key that restarts the game at any time
pub const REPLAY_KEY: KeyCode = KeyCode::F(5);
/// Key that opens the controls dialog
pub const SETTINGS_KEY: KeyCode = KeyCode::F(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the game loop as is
    Game(Command),
    /// The bound restart key; only honoured once the game is over
    Restart,
    OpenSettings,
    Quit,
    None,
}

/// Translates raw key events into game actions using the current bindings
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, bindings: &KeyBindings, key: KeyEvent) -> KeyAction {
        // One action per physical press
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let code = normalize_key(key.code);

        // Bound movement keys win over everything else
        for action in [
            BindingAction::Left,
            BindingAction::Right,
            BindingAction::Up,
            BindingAction::Down,
        ] {
            if bindings.matches(action, code) {
                if let Some(direction) = action.direction() {
                    return KeyAction::Game(Command::Turn(direction));
                }
            }
        }

        match code {
            // Arrow keys always steer
            KeyCode::Left => return KeyAction::Game(Direction::Left.into()),
            KeyCode::Right => return KeyAction::Game(Direction::Right.into()),
            KeyCode::Up => return KeyAction::Game(Direction::Up.into()),
            KeyCode::Down => return KeyAction::Game(Direction::Down.into()),
            _ => {}
        }

        if bindings.matches(BindingAction::Restart, code) {
            return KeyAction::Restart;
        }

        match code {
            code if code == REPLAY_KEY => KeyAction::Game(Command::Restart),
            code if code == SETTINGS_KEY => KeyAction::OpenSettings,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
