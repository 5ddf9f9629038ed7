use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Largest playfield accepted, in cells
pub const MAX_CELLS: i64 = 10_000;

/// Tick cadence tuning
///
/// The interval between ticks shrinks as the snake grows:
/// `max(floor, base - min(max_speedup, length * per_segment))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Interval at the start of a game, in milliseconds
    pub base_ms: u64,
    /// Speedup contributed by each body segment, in milliseconds
    pub per_segment_ms: u64,
    /// Upper bound on the total speedup, in milliseconds
    pub max_speedup_ms: u64,
    /// Shortest interval ever used, in milliseconds
    pub floor_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            base_ms: 120,
            per_segment_ms: 2,
            max_speedup_ms: 40,
            floor_ms: 30,
        }
    }
}

impl CadenceConfig {
    /// Interval used before any length-based speedup applies
    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_ms)
    }

    /// Effective tick interval for a snake of the given length
    pub fn interval_for(&self, length: usize) -> Duration {
        let speedup = (length as u64)
            .saturating_mul(self.per_segment_ms)
            .min(self.max_speedup_ms);
        let millis = self.base_ms.saturating_sub(speedup).max(self.floor_ms);
        Duration::from_millis(millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_ms == 0 {
            return Err(ConfigError::InvalidCadence(
                "base interval must be positive".to_string(),
            ));
        }
        if self.floor_ms == 0 || self.floor_ms > self.base_ms {
            return Err(ConfigError::InvalidCadence(format!(
                "floor {}ms must be in 1..={}ms",
                self.floor_ms, self.base_ms
            )));
        }
        Ok(())
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in pixels
    pub screen_width: i32,
    /// Height of the playfield in pixels
    pub screen_height: i32,
    /// Side of one square cell in pixels
    pub unit_size: i32,
    /// Length of the snake after a (re)start
    pub initial_length: usize,
    /// Tick cadence tuning
    pub cadence: CadenceConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 600,
            unit_size: 25,
            initial_length: 6,
            cadence: CadenceConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom playfield size
    pub fn new(screen_width: i32, screen_height: i32, unit_size: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            unit_size,
            ..Default::default()
        }
    }

    /// Create a small playfield for testing
    pub fn small() -> Self {
        Self::new(250, 250, 25)
    }

    /// Check that the playfield divides evenly into cells and the cadence is sane
    pub fn validate(&self) -> Result<()> {
        if self.unit_size <= 0 {
            return Err(ConfigError::InvalidGrid(format!(
                "unit size must be positive, got {}",
                self.unit_size
            )));
        }
        for (name, value) in [("width", self.screen_width), ("height", self.screen_height)] {
            if value < self.unit_size {
                return Err(ConfigError::InvalidGrid(format!(
                    "{name} {value} is smaller than one {}px cell",
                    self.unit_size
                )));
            }
            if value % self.unit_size != 0 {
                return Err(ConfigError::InvalidGrid(format!(
                    "{name} {value} is not a multiple of the {}px unit",
                    self.unit_size
                )));
            }
        }
        let cells = i64::from(self.screen_width / self.unit_size)
            * i64::from(self.screen_height / self.unit_size);
        if cells > MAX_CELLS {
            return Err(ConfigError::InvalidGrid(format!(
                "{cells} cells exceeds the limit of {MAX_CELLS}"
            )));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::InvalidLength(self.initial_length));
        }
        self.cadence.validate()
    }
}
