use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::Direction;

/// Logical action a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BindingAction {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl BindingAction {
    /// All actions in display order
    pub const ALL: [BindingAction; 5] = [
        BindingAction::Up,
        BindingAction::Down,
        BindingAction::Left,
        BindingAction::Right,
        BindingAction::Restart,
    ];

    /// Key used when nothing else is bound
    pub fn default_key(&self) -> KeyCode {
        match self {
            BindingAction::Up => KeyCode::Char('w'),
            BindingAction::Down => KeyCode::Char('s'),
            BindingAction::Left => KeyCode::Char('a'),
            BindingAction::Right => KeyCode::Char('d'),
            BindingAction::Restart => KeyCode::Char('z'),
        }
    }

    /// Steering direction for the movement actions
    pub fn direction(&self) -> Option<Direction> {
        match self {
            BindingAction::Up => Some(Direction::Up),
            BindingAction::Down => Some(Direction::Down),
            BindingAction::Left => Some(Direction::Left),
            BindingAction::Right => Some(Direction::Right),
            BindingAction::Restart => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BindingAction::Up => "Up",
            BindingAction::Down => "Down",
            BindingAction::Left => "Left",
            BindingAction::Right => "Right",
            BindingAction::Restart => "Restart",
        }
    }
}

/// Remappable key bindings
///
/// Unbound actions fall back to the WASD + Z defaults. Nothing prevents two
/// actions from sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<BindingAction, KeyCode>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key currently bound to an action
    pub fn get(&self, action: BindingAction) -> KeyCode {
        self.keys
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_key())
    }

    /// Bind an action to a raw key, returning the previous key
    pub fn set(&mut self, action: BindingAction, key: KeyCode) -> KeyCode {
        let previous = self.get(action);
        self.keys.insert(action, normalize_key(key));
        previous
    }

    /// Every action with its key, in display order
    pub fn iter(&self) -> impl Iterator<Item = (BindingAction, KeyCode)> + '_ {
        BindingAction::ALL
            .into_iter()
            .map(move |action| (action, self.get(action)))
    }

    /// Does this key trigger the action?
    pub fn matches(&self, action: BindingAction, key: KeyCode) -> bool {
        normalize_key(self.get(action)) == normalize_key(key)
    }
}

/// Fold letter case so `W` and `w` are the same physical key
pub fn normalize_key(key: KeyCode) -> KeyCode {
    match key {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Human-readable name of a key
pub fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Modifier(modifier) => format!("{modifier:?}"),
        other => format!("{other:?}"),
    }
}
