//! Procedurally placed wall obstacles

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::placement::{Constraint, sample};
use crate::consts::{WALL_MAX_ATTEMPTS, WALL_MIN_BODY_DISTANCE, WALL_MIN_HEAD_DISTANCE};

/// Obstacle cells, regenerated from scratch after each eat in wall mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSet {
    cells: Vec<Cell>,
}

impl WallSet {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Replace every wall with a fresh set of up to `count` cells.
    ///
    /// Each wall keeps its distance from the head and body, avoids the food and
    /// the walls already placed in this pass. A wall that can't be placed within
    /// its attempt budget is skipped.
    pub fn regenerate<R: Rng>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
        head: Cell,
        body: &[Cell],
        food: Cell,
        count: usize,
    ) {
        let mut placed: Vec<Cell> = Vec::with_capacity(count.min(grid.area()));
        for _ in 0..count {
            let constraints = [
                Constraint::MinDistance {
                    from: head,
                    distance: WALL_MIN_HEAD_DISTANCE,
                },
                Constraint::MinDistanceFromAll {
                    cells: body,
                    distance: WALL_MIN_BODY_DISTANCE,
                },
                Constraint::NotAt(food),
                Constraint::NotIn(&placed),
            ];
            match sample(grid, rng, &constraints, WALL_MAX_ATTEMPTS) {
                Ok(cell) => placed.push(cell),
                Err(e) => log::debug!("Skipping wall: {}", e),
            }
        }
        if placed.len() < count {
            log::debug!("Placed {} of {} walls", placed.len(), count);
        }
        self.cells = placed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manhattan;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_regenerate_respects_distances() {
        let grid = Grid::new(20, 20);
        let head = Cell::new(10, 10);
        let body = vec![Cell::new(9, 10), Cell::new(8, 10), Cell::new(7, 10)];
        let food = Cell::new(2, 2);

        for seed in 0..30 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut walls = WallSet::new();
            walls.regenerate(&grid, &mut rng, head, &body, food, 8);

            assert!(walls.len() <= 8);
            for (i, &wall) in walls.cells().iter().enumerate() {
                assert!(manhattan(wall, head) >= 5);
                assert!(body.iter().all(|&b| manhattan(wall, b) >= 3));
                assert_ne!(wall, food);
                assert!(!walls.cells()[i + 1..].contains(&wall));
            }
        }
    }

    #[test]
    fn test_regenerate_replaces_previous_set() {
        let grid = Grid::new(20, 20);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut walls = WallSet::new();
        walls.regenerate(&grid, &mut rng, Cell::new(0, 0), &[], Cell::new(19, 19), 8);
        let first = walls.clone();
        walls.regenerate(&grid, &mut rng, Cell::new(0, 0), &[], Cell::new(19, 19), 3);
        assert!(walls.len() <= 3);
        assert_ne!(walls, first);
    }

    #[test]
    fn test_crowded_board_degrades() {
        // Every cell of a 5x5 board is within distance 4 of the centre
        let grid = Grid::new(5, 5);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut walls = WallSet::new();
        walls.regenerate(&grid, &mut rng, Cell::new(2, 2), &[], Cell::new(0, 0), 8);
        assert!(walls.is_empty());
    }
}
