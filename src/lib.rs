//! Pocket Snake - a touch-driven grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, walls, placement, tick)
//! - `session`: Tick clock, pressure timer and observer dispatch around `sim`
//! - `input`: Touch events and swipe recognition
//! - `config`: Session configuration
//! - `settings`: Persisted player preferences
//! - `highscores`: High score, history and aggregate stats
//! - `persistence`: Key/value storage backends
//! - `platform`: Browser/native platform abstraction

pub mod config;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::{Records, ScoreKeeper};
pub use session::{Observer, Session};
pub use settings::Settings;
pub use sim::SpeedLevel;

/// Game configuration constants
pub mod consts {
    /// Screen pixels per grid cell
    pub const CELL_SIZE_PX: f32 = 30.0;
    /// Default grid (a 390x750 portrait screen at 30 px per cell)
    pub const DEFAULT_GRID_WIDTH: i32 = 13;
    pub const DEFAULT_GRID_HEIGHT: i32 = 25;

    /// Base tick intervals per speed level (ms)
    pub const SLOW_INTERVAL_MS: u64 = 160;
    pub const NORMAL_INTERVAL_MS: u64 = 120;
    pub const FAST_INTERVAL_MS: u64 = 80;

    /// Rejection sampling budget for a food cell
    pub const FOOD_MAX_ATTEMPTS: u32 = 100;
    /// Rejection sampling budget per wall
    pub const WALL_MAX_ATTEMPTS: u32 = 50;
    /// Walls requested per generation pass
    pub const WALL_COUNT: usize = 8;
    /// Minimum Manhattan distance from a wall to the head
    pub const WALL_MIN_HEAD_DISTANCE: i32 = 5;
    /// Minimum Manhattan distance from a wall to every body cell
    pub const WALL_MIN_BODY_DISTANCE: i32 = 3;

    /// Food starts this many cells to the right of the head
    pub const INITIAL_FOOD_OFFSET: i32 = 5;

    /// Continuous contact needed before touch pressure changes speed (ms)
    pub const SUSTAIN_THRESHOLD_MS: u64 = 250;
    /// Interval multiplier with one sustained touch (faster)
    pub const ONE_TOUCH_MULTIPLIER: f32 = 0.5;
    /// Interval multiplier with two or more sustained touches (slower)
    pub const MULTI_TOUCH_MULTIPLIER: f32 = 2.0;

    /// Minimum dominant-axis displacement for a swipe (px)
    pub const SWIPE_THRESHOLD_PX: f32 = 10.0;

    /// Maximum ticks replayed by one `advance` call to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// History entries kept by the records collaborator
    pub const MAX_HISTORY: usize = 10;
}

/// Manhattan distance between two grid cells
#[inline]
pub fn manhattan(a: sim::Cell, b: sim::Cell) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
