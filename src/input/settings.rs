//! Controls dialog for remapping key bindings
//!
//! The dialog lists every bindable action. Selecting one and pressing Enter
//! arms it; the next key pressed, whatever it is, becomes the new binding.
//!
//! # Controls
//!
//! - Up/Down or K/J: Move selection
//! - Enter/Space: Capture a new key for the selected action
//! - Esc/F2: Close

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::info;

use super::bindings::{key_label, BindingAction, KeyBindings};
use super::handler::SETTINGS_KEY;

/// Outcome of a key press inside the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    None,
    /// A binding was written
    Assigned {
        action: BindingAction,
        key: KeyCode,
        previous: KeyCode,
    },
    Closed,
}

#[derive(Debug, Default)]
pub struct SettingsDialog {
    open: bool,
    selected: usize,
    /// Action waiting for its next key press
    awaiting: Option<BindingAction>,
}

impl SettingsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.awaiting = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.awaiting = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> BindingAction {
        BindingAction::ALL[self.selected]
    }

    pub fn awaiting(&self) -> Option<BindingAction> {
        self.awaiting
    }

    /// Arm an action so the next key press is bound to it
    pub fn begin_assign(&mut self, action: BindingAction) {
        if let Some(index) = BindingAction::ALL.iter().position(|&a| a == action) {
            self.selected = index;
        }
        self.awaiting = Some(action);
    }

    /// Route a key press while the dialog is open
    pub fn handle_key(&mut self, bindings: &mut KeyBindings, key: KeyEvent) -> DialogEvent {
        if !self.open || key.kind != KeyEventKind::Press {
            return DialogEvent::None;
        }

        if let Some(action) = self.awaiting.take() {
            return Self::assign(bindings, action, key.code);
        }

        let count = BindingAction::ALL.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + count - 1) % count;
                DialogEvent::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % count;
                DialogEvent::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.begin_assign(self.selected());
                DialogEvent::None
            }
            code if code == KeyCode::Esc || code == SETTINGS_KEY => {
                self.close();
                DialogEvent::Closed
            }
            _ => DialogEvent::None,
        }
    }

    fn assign(bindings: &mut KeyBindings, action: BindingAction, key: KeyCode) -> DialogEvent {
        let previous = bindings.set(action, key);
        let key = bindings.get(action);
        info!(
            "{} rebound from {} to {}",
            action.label(),
            key_label(previous),
            key_label(key)
        );
        DialogEvent::Assigned {
            action,
            key,
            previous,
        }
    }
}
