//! Application configuration loaded from an optional JSON file

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{ConfigError, Result};
use crate::game::GameConfig;
use crate::input::KeyBindings;

/// Everything the front end needs before the first tick
///
/// Every field is optional in the file; missing ones take their defaults.
///
/// ```json
/// {
///   "game": { "screen_width": 500, "unit_size": 25 },
///   "key_bindings": { "Restart": { "Char": "r" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub key_bindings: KeyBindings,
}

impl AppConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.game.validate()?;
        Ok(config)
    }
}
