//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick
//! - Seeded RNG only
//! - No clocks, rendering, storage or platform dependencies

pub mod direction;
pub mod grid;
pub mod placement;
pub mod snake;
pub mod speed;
pub mod state;
pub mod tick;
pub mod walls;

pub use direction::{Direction, DirectionController};
pub use grid::{Cell, Grid};
pub use placement::{Constraint, PlacementError, place_food, sample, scan_free};
pub use snake::Snake;
pub use speed::{DebounceTimer, SpeedController, SpeedLevel, TouchPressure, active_interval};
pub use state::{GameEvent, GameOverCause, GameState, GameStatus, Snapshot};
pub use tick::{TickOutcome, tick};
pub use walls::WallSet;
