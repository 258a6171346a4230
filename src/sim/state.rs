//! Game state and core simulation types
//!
//! The tick engine owns one `GameState` and is the only thing that mutates it.
//! Everything else sees `Snapshot`s and `GameEvent`s.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, DirectionController};
use super::grid::{Cell, Grid};
use super::placement::place_food;
use super::snake::Snake;
use super::walls::WallSet;
use crate::config::{ConfigError, GameConfig};
use crate::consts::INITIAL_FOOD_OFFSET;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the first touch
    Idle,
    /// Tick clock active
    Running,
    /// Terminal; a new session is needed to play again
    GameOver,
}

/// What ended the session. Every cause leads to the same transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverCause {
    OutOfBounds,
    SelfCollision,
    Wall,
    /// No free cell left for food
    BoardFull,
}

/// Outbound events for collaborators (records, feedback, navigation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    ScoreUpdate { score: u32 },
    FoodEaten { cell: Cell },
    GameOver { final_score: u32, cause: GameOverCause },
}

/// Read-only copy of the board handed to renderers once per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Completed ticks
    pub tick: u64,
    pub head: Cell,
    /// Neck first, tail last
    pub body: Vec<Cell>,
    pub food: Cell,
    pub walls: Vec<Cell>,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
}

/// Authoritative simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: Grid,
    pub snake: Snake,
    pub food: Cell,
    pub walls: WallSet,
    pub wall_mode: bool,
    /// Walls requested per regeneration
    pub wall_count: usize,
    pub direction: DirectionController,
    pub status: GameStatus,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session: head in the centre heading right, food a few cells
    /// ahead, and an initial wall pass in wall mode
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid;
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let head = grid.center();

        let ahead = head + Cell::new(INITIAL_FOOD_OFFSET, 0);
        let food = if grid.in_bounds(ahead) {
            ahead
        } else {
            place_food(&grid, &mut rng, head, &[], &[]).map_err(|_| ConfigError::BoardTooSmall {
                width: grid.width,
                height: grid.height,
            })?
        };

        let mut walls = WallSet::new();
        if config.wall_mode {
            walls.regenerate(&grid, &mut rng, head, &[], food, config.wall_count);
        }

        log::debug!(
            "New session: {}x{} grid, seed {}, walls {}",
            grid.width,
            grid.height,
            config.seed,
            walls.len()
        );

        Ok(Self {
            seed: config.seed,
            rng,
            grid,
            snake: Snake::new(head),
            food,
            walls,
            wall_mode: config.wall_mode,
            wall_count: config.wall_count,
            direction: DirectionController::new(Direction::Right),
            status: GameStatus::Idle,
            score: 0,
            time_ticks: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Idle -> Running. Returns false if the session was not idle.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Idle {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            head: self.snake.head,
            body: self.snake.body.clone(),
            food: self.food,
            walls: self.walls.cells().to_vec(),
            direction: self.direction.current(),
            score: self.score,
            status: self.status,
        }
    }
}
