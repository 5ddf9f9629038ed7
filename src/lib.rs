//! Snake Arcade - classic Snake in the terminal
//!
//! This library provides:
//! - Core game logic with an injectable tick scheduler (game module)
//! - Keyboard bindings, key translation and the remapping dialog (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal front end (modes module)

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use config::AppConfig;
pub use error::ConfigError;
