//! Session configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MULTI_TOUCH_MULTIPLIER, ONE_TOUCH_MULTIPLIER, WALL_COUNT};
use crate::sim::{Grid, SpeedLevel};

/// Reasons a configuration can't start a session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} needs at least two cells")]
    BoardTooSmall { width: i32, height: i32 },
    #[error("base tick interval must be at least 1 ms")]
    ZeroInterval,
    #[error("{count} walls don't fit on a board of {cells} cells")]
    TooManyWalls { count: usize, cells: usize },
    #[error("touch multiplier {0} must be finite and positive")]
    InvalidMultiplier(f32),
}

/// Everything a new session needs, fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: Grid,
    pub speed: SpeedLevel,
    /// Procedural walls regenerate after every eat
    pub wall_mode: bool,
    /// Walls requested per regeneration
    #[serde(default = "default_wall_count")]
    pub wall_count: usize,
    /// RNG seed for food and wall placement
    #[serde(default)]
    pub seed: u64,
    /// Overrides the speed level's base interval (ms)
    #[serde(default)]
    pub base_interval_ms: Option<u64>,
    /// Interval scale for one sustained touch
    #[serde(default = "default_one_touch_multiplier")]
    pub one_touch_multiplier: f32,
    /// Interval scale for two or more sustained touches
    #[serde(default = "default_multi_touch_multiplier")]
    pub multi_touch_multiplier: f32,
}

fn default_wall_count() -> usize {
    WALL_COUNT
}

fn default_one_touch_multiplier() -> f32 {
    ONE_TOUCH_MULTIPLIER
}

fn default_multi_touch_multiplier() -> f32 {
    MULTI_TOUCH_MULTIPLIER
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            speed: SpeedLevel::Normal,
            wall_mode: false,
            wall_count: WALL_COUNT,
            seed: 0,
            base_interval_ms: None,
            one_touch_multiplier: ONE_TOUCH_MULTIPLIER,
            multi_touch_multiplier: MULTI_TOUCH_MULTIPLIER,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width <= 0 || self.grid.height <= 0 || self.grid.area() < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.base_interval_ms() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.wall_count > self.grid.area() {
            return Err(ConfigError::TooManyWalls {
                count: self.wall_count,
                cells: self.grid.area(),
            });
        }
        for multiplier in [self.one_touch_multiplier, self.multi_touch_multiplier] {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier(multiplier));
            }
        }
        Ok(())
    }

    /// Tick interval with no touch modifier
    pub fn base_interval_ms(&self) -> u64 {
        self.base_interval_ms
            .unwrap_or_else(|| self.speed.base_interval_ms())
    }
}
