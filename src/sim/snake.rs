//! Snake body representation

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// The player's snake: a head plus body cells ordered from neck to tail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub head: Cell,
    /// Neck first, tail last
    pub body: Vec<Cell>,
}

impl Snake {
    /// A bare head with no body
    pub fn new(head: Cell) -> Self {
        Self {
            head,
            body: Vec::new(),
        }
    }

    /// Body length (the head is not counted)
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True if `cell` lies on the current body.
    ///
    /// Checked before the move, so the tail cell that is about to be vacated
    /// still counts.
    pub fn self_collides(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Step onto `new_head`. The old head becomes the neck; the tail is
    /// dropped unless the snake grew this tick.
    pub fn advance(&mut self, new_head: Cell, grew: bool) {
        self.body.insert(0, self.head);
        if !grew {
            self.body.pop();
        }
        self.head = new_head;
    }

    /// Head followed by the body
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Head and body cells are pairwise distinct
    pub fn is_consistent(&self) -> bool {
        let cells: Vec<Cell> = self.cells().collect();
        cells
            .iter()
            .enumerate()
            .all(|(i, a)| cells[i + 1..].iter().all(|b| a != b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_of(cells: &[(i32, i32)]) -> Snake {
        let mut snake = Snake::new(Cell::new(cells[0].0, cells[0].1));
        snake.body = cells[1..].iter().map(|&(x, y)| Cell::new(x, y)).collect();
        snake
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = snake_of(&[(5, 5), (4, 5), (3, 5)]);
        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.head, Cell::new(6, 5));
        assert_eq!(snake.body, vec![Cell::new(5, 5), Cell::new(4, 5)]);
    }

    #[test]
    fn test_advance_grows_by_one() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(6, 5), true);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.body, vec![Cell::new(5, 5)]);

        snake.advance(Cell::new(7, 5), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.body, vec![Cell::new(6, 5)]);
    }

    #[test]
    fn test_self_collision_includes_tail() {
        let snake = snake_of(&[(5, 5), (5, 6), (4, 6), (4, 5)]);
        assert!(snake.self_collides(Cell::new(4, 5)));
        assert!(!snake.self_collides(Cell::new(6, 5)));
        assert!(!snake.self_collides(snake.head));
    }

    #[test]
    fn test_consistency() {
        assert!(snake_of(&[(1, 1), (1, 2), (1, 3)]).is_consistent());
        assert!(!snake_of(&[(1, 1), (1, 2), (1, 1)]).is_consistent());
    }
}
