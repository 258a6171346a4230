//! Constrained rejection sampling for food and wall cells
//!
//! Candidates are drawn uniformly from the grid and tested against a list of
//! constraints. Sampling is bounded by a fixed attempt budget; callers decide
//! what exhaustion means for them.

use rand::Rng;
use thiserror::Error;

use super::grid::{Cell, Grid};
use crate::consts::FOOD_MAX_ATTEMPTS;
use crate::manhattan;

/// Why a placement produced no cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Rejection sampling hit its attempt cap
    #[error("no valid cell found in {attempts} attempts")]
    Exhausted { attempts: u32 },
    /// Exhaustive scan found no cell satisfying the constraints
    #[error("no free cell left on the board")]
    NoFreeCell,
}

/// A single rule a candidate cell must satisfy
#[derive(Debug, Clone, Copy)]
pub enum Constraint<'a> {
    /// Must not be this cell
    NotAt(Cell),
    /// Must not be any of these cells
    NotIn(&'a [Cell]),
    /// Manhattan distance to `from` must be at least `distance`
    MinDistance { from: Cell, distance: i32 },
    /// Manhattan distance to every cell in `cells` must be at least `distance`
    MinDistanceFromAll { cells: &'a [Cell], distance: i32 },
}

impl Constraint<'_> {
    pub fn allows(&self, cell: Cell) -> bool {
        match *self {
            Constraint::NotAt(other) => cell != other,
            Constraint::NotIn(cells) => !cells.contains(&cell),
            Constraint::MinDistance { from, distance } => manhattan(cell, from) >= distance,
            Constraint::MinDistanceFromAll { cells, distance } => {
                cells.iter().all(|&c| manhattan(cell, c) >= distance)
            }
        }
    }
}

#[inline]
fn satisfies(cell: Cell, constraints: &[Constraint<'_>]) -> bool {
    constraints.iter().all(|c| c.allows(cell))
}

/// Draw random cells until one satisfies every constraint, at most `max_attempts` times
pub fn sample<R: Rng>(
    grid: &Grid,
    rng: &mut R,
    constraints: &[Constraint<'_>],
    max_attempts: u32,
) -> Result<Cell, PlacementError> {
    if grid.area() == 0 {
        return Err(PlacementError::NoFreeCell);
    }
    for _ in 0..max_attempts {
        let cell = grid.random_cell(rng);
        if satisfies(cell, constraints) {
            return Ok(cell);
        }
    }
    Err(PlacementError::Exhausted {
        attempts: max_attempts,
    })
}

/// Pick uniformly among every cell satisfying the constraints
pub fn scan_free<R: Rng>(
    grid: &Grid,
    rng: &mut R,
    constraints: &[Constraint<'_>],
) -> Result<Cell, PlacementError> {
    let free: Vec<Cell> = grid.cells().filter(|&c| satisfies(c, constraints)).collect();
    if free.is_empty() {
        return Err(PlacementError::NoFreeCell);
    }
    Ok(free[rng.random_range(0..free.len())])
}

/// Place food off the head, body and walls.
///
/// Falls back to an exhaustive scan when rejection sampling runs out of
/// attempts, so this only fails when the board is genuinely full.
pub fn place_food<R: Rng>(
    grid: &Grid,
    rng: &mut R,
    head: Cell,
    body: &[Cell],
    walls: &[Cell],
) -> Result<Cell, PlacementError> {
    let constraints = [
        Constraint::NotAt(head),
        Constraint::NotIn(body),
        Constraint::NotIn(walls),
    ];
    match sample(grid, rng, &constraints, FOOD_MAX_ATTEMPTS) {
        Err(PlacementError::Exhausted { attempts }) => {
            log::debug!("Food sampling exhausted after {} attempts, scanning free cells", attempts);
            scan_free(grid, rng, &constraints)
        }
        result => result,
    }
}
