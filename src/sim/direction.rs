//! Movement directions and per-tick direction buffering

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// One of the four unit moves. Grid y grows downward, like screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction
    pub fn delta(self) -> Cell {
        match self {
            Direction::Up => Cell::NEG_Y,
            Direction::Down => Cell::Y,
            Direction::Left => Cell::NEG_X,
            Direction::Right => Cell::X,
        }
    }

    /// Parse a unit vector; anything else (including zero) is rejected
    pub fn from_delta(delta: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Buffers the latest proposed direction and commits one per tick.
///
/// A proposal that exactly reverses the committed direction is discarded at
/// commit time. The first proposal after a reset seeds the direction without
/// that check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    committed: Direction,
    pending: Option<Direction>,
    seeded: bool,
}

impl DirectionController {
    pub fn new(initial: Direction) -> Self {
        Self {
            committed: initial,
            pending: None,
            seeded: false,
        }
    }

    /// Controller that has already committed `direction`, so reversals are
    /// rejected from the first proposal on
    pub fn seeded(direction: Direction) -> Self {
        Self {
            committed: direction,
            pending: None,
            seeded: true,
        }
    }

    /// Record a candidate direction; later proposals overwrite earlier ones
    pub fn propose(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Direction currently in effect
    pub fn current(&self) -> Direction {
        self.committed
    }

    /// Direction waiting for the next commit, if any
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Resolve the direction for this tick
    pub fn commit(&mut self) -> Direction {
        if let Some(next) = self.pending.take() {
            if !self.seeded {
                self.committed = next;
                self.seeded = true;
            } else if next.is_opposite(self.committed) {
                log::debug!("Rejected reversal {:?} -> {:?}", self.committed, next);
            } else {
                self.committed = next;
            }
        }
        self.committed
    }
}
