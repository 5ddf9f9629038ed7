//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`GameLoop`] and a [`TickScheduler`].

pub mod action;
pub mod config;
pub mod engine;
pub mod schedule;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{CadenceConfig, GameConfig};
pub use engine::GameLoop;
pub use schedule::{ManualScheduler, TickScheduler};
pub use state::{CollisionType, Grid, Position, RunState, Snake, Snapshot};
