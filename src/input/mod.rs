//! Keyboard input: bindings, key translation, and the remapping dialog

pub mod bindings;
pub mod handler;
pub mod settings;

pub use bindings::{key_label, BindingAction, KeyBindings};
pub use handler::{InputHandler, KeyAction, REPLAY_KEY, SETTINGS_KEY};
pub use settings::{DialogEvent, SettingsDialog};
