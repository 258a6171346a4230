//! Fixed-rate simulation tick
//!
//! One call advances the snake by one cell and resolves collisions, eating and
//! regeneration. Collisions are checked in a fixed order: bounds, body, walls.

use super::placement::place_food;
use super::state::{GameEvent, GameOverCause, GameState, GameStatus};

/// Result of one tick, for callers that care about more than events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened
    Skipped,
    Moved,
    Ate,
    Ended(GameOverCause),
}

/// Advance the game state by one step, pushing any outbound events
pub fn tick(state: &mut GameState, events: &mut Vec<GameEvent>) -> TickOutcome {
    if state.status != GameStatus::Running {
        return TickOutcome::Skipped;
    }

    let direction = state.direction.commit();
    let new_head = state.snake.head + direction.delta();

    let collision = if !state.grid.in_bounds(new_head) {
        Some(GameOverCause::OutOfBounds)
    } else if state.snake.self_collides(new_head) {
        Some(GameOverCause::SelfCollision)
    } else if state.wall_mode && state.walls.occupies(new_head) {
        Some(GameOverCause::Wall)
    } else {
        None
    };

    if let Some(cause) = collision {
        end_game(state, cause, events);
        return TickOutcome::Ended(cause);
    }

    state.time_ticks += 1;

    let food_eaten = new_head == state.food;
    state.snake.advance(new_head, food_eaten);

    if !food_eaten {
        return TickOutcome::Moved;
    }

    state.score += 1;
    events.push(GameEvent::ScoreUpdate { score: state.score });
    events.push(GameEvent::FoodEaten { cell: new_head });

    match place_food(
        &state.grid,
        &mut state.rng,
        state.snake.head,
        &state.snake.body,
        state.walls.cells(),
    ) {
        Ok(food) => state.food = food,
        Err(e) => {
            log::info!("Food placement failed: {}", e);
            end_game(state, GameOverCause::BoardFull, events);
            return TickOutcome::Ended(GameOverCause::BoardFull);
        }
    }

    if state.wall_mode {
        state.walls.regenerate(
            &state.grid,
            &mut state.rng,
            state.snake.head,
            &state.snake.body,
            state.food,
            state.wall_count,
        );
    }

    TickOutcome::Ate
}

fn end_game(state: &mut GameState, cause: GameOverCause, events: &mut Vec<GameEvent>) {
    log::info!("Game over ({:?}) with score {}", cause, state.score);
    state.status = GameStatus::GameOver;
    events.push(GameEvent::GameOver {
        final_score: state.score,
        cause,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::manhattan;
    use crate::sim::direction::{Direction, DirectionController};
    use crate::sim::grid::{Cell, Grid};
    use proptest::prelude::*;

    fn running_state(width: i32, height: i32, wall_mode: bool, seed: u64) -> GameState {
        let config = GameConfig {
            grid: Grid::new(width, height),
            wall_mode,
            seed,
            ..Default::default()
        };
        let mut state = GameState::new(&config).unwrap();
        state.start();
        state
    }

    #[test]
    fn test_tick_skipped_unless_running() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config).unwrap();
        let mut events = Vec::new();
        let head = state.snake.head;

        assert_eq!(tick(&mut state, &mut events), TickOutcome::Skipped);
        assert_eq!(state.snake.head, head);
        assert!(events.is_empty());
    }

    #[test]
    fn test_eat_grows_and_scores() {
        let mut state = running_state(10, 10, false, 1);
        state.snake.head = Cell::new(5, 5);
        state.food = Cell::new(6, 5);
        let mut events = Vec::new();

        assert_eq!(tick(&mut state, &mut events), TickOutcome::Ate);
        assert_eq!(state.snake.head, Cell::new(6, 5));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 1);
        assert_ne!(state.food, Cell::new(6, 5));
        assert!(!state.snake.self_collides(state.food));
        assert_eq!(
            events,
            vec![
                GameEvent::ScoreUpdate { score: 1 },
                GameEvent::FoodEaten {
                    cell: Cell::new(6, 5)
                },
            ]
        );
    }

    #[test]
    fn test_move_preserves_length() {
        let mut state = running_state(10, 10, false, 2);
        state.snake.head = Cell::new(5, 5);
        state.snake.body = vec![Cell::new(4, 5), Cell::new(3, 5)];
        state.food = Cell::new(0, 0);
        let mut events = Vec::new();

        assert_eq!(tick(&mut state, &mut events), TickOutcome::Moved);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.body, vec![Cell::new(5, 5), Cell::new(4, 5)]);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_out_of_bounds_ends_game() {
        let mut state = running_state(10, 10, false, 3);
        state.snake.head = Cell::new(0, 5);
        state.score = 7;
        state.direction = DirectionController::seeded(Direction::Left);
        let mut events = Vec::new();

        let outcome = tick(&mut state, &mut events);
        assert_eq!(outcome, TickOutcome::Ended(GameOverCause::OutOfBounds));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.head, Cell::new(0, 5));
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                final_score: 7,
                cause: GameOverCause::OutOfBounds
            }]
        );

        // Terminal
        events.clear();
        assert_eq!(tick(&mut state, &mut events), TickOutcome::Skipped);
        assert!(events.is_empty());
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = running_state(10, 10, false, 4);
        // Head at (5,5) moving down into its own body
        state.snake.head = Cell::new(5, 5);
        state.snake.body = vec![
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
            Cell::new(6, 6),
        ];
        state.direction = DirectionController::seeded(Direction::Down);
        let mut events = Vec::new();

        let outcome = tick(&mut state, &mut events);
        assert_eq!(outcome, TickOutcome::Ended(GameOverCause::SelfCollision));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_wall_collision_only_in_wall_mode() {
        let mut state = running_state(20, 20, true, 5);
        state.food = Cell::new(15, 15);
        state.walls.regenerate(
            &Grid::new(20, 20),
            &mut state.rng,
            Cell::new(10, 10),
            &[],
            Cell::new(15, 15),
            8,
        );
        let wall = state.walls.cells().iter().copied().find(|w| w.x > 0).unwrap();
        state.snake.head = wall - Direction::Right.delta();
        let mut events = Vec::new();

        // Same board with wall mode off walks straight through
        let mut open = state.clone();
        open.wall_mode = false;
        assert_ne!(
            tick(&mut open, &mut events),
            TickOutcome::Ended(GameOverCause::Wall)
        );

        events.clear();
        let outcome = tick(&mut state, &mut events);
        assert_eq!(outcome, TickOutcome::Ended(GameOverCause::Wall));
    }

    #[test]
    fn test_bounds_checked_before_walls() {
        let mut state = running_state(10, 10, true, 6);
        state.snake.head = Cell::new(9, 5);
        let mut events = Vec::new();
        assert_eq!(
            tick(&mut state, &mut events),
            TickOutcome::Ended(GameOverCause::OutOfBounds)
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_reversal_into_neck_is_ignored() {
        let mut state = running_state(10, 10, false, 7);
        state.snake.head = Cell::new(5, 5);
        state.snake.body = vec![Cell::new(4, 5), Cell::new(3, 5), Cell::new(2, 5)];
        state.food = Cell::new(0, 0);
        state.direction = DirectionController::seeded(Direction::Right);
        state.direction.propose(Direction::Left);
        let mut events = Vec::new();

        assert_eq!(tick(&mut state, &mut events), TickOutcome::Moved);
        assert_eq!(state.snake.head, Cell::new(6, 5));
        assert_eq!(state.direction.current(), Direction::Right);
    }

    #[test]
    fn test_eating_regenerates_walls() {
        let mut state = running_state(20, 20, true, 8);
        state.walls.clear();
        state.snake.head = Cell::new(3, 3);
        state.food = Cell::new(4, 3);
        let mut events = Vec::new();

        assert_eq!(tick(&mut state, &mut events), TickOutcome::Ate);
        assert!(!state.walls.is_empty());
        for &wall in state.walls.cells() {
            assert!(manhattan(wall, state.snake.head) >= 5);
            assert!(state.snake.body.iter().all(|&b| manhattan(wall, b) >= 3));
            assert_ne!(wall, state.food);
        }
    }

    #[test]
    fn test_filling_the_board_ends_game() {
        // 3x1 board: head at (1,0), food at (2,0), body at (0,0)
        let mut state = running_state(3, 1, false, 9);
        state.snake.head = Cell::new(1, 0);
        state.snake.body = vec![Cell::new(0, 0)];
        state.food = Cell::new(2, 0);
        let mut events = Vec::new();

        assert_eq!(
            tick(&mut state, &mut events),
            TickOutcome::Ended(GameOverCause::BoardFull)
        );
        assert_eq!(state.score, 1);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                final_score: 1,
                cause: GameOverCause::BoardFull
            })
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(15, 15, true, 4242);
        let mut b = running_state(15, 15, true, 4242);
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        let (mut ea, mut eb) = (Vec::new(), Vec::new());

        for i in 0..60 {
            if i % 3 == 0 {
                a.direction.propose(turns[i / 3 % 4]);
                b.direction.propose(turns[i / 3 % 4]);
            }
            tick(&mut a, &mut ea);
            tick(&mut b, &mut eb);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(ea, eb);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        /// Body stays distinct and off the head, food stays off snake and walls
        #[test]
        fn prop_board_invariants_hold(
            seed in any::<u64>(),
            wall_mode in any::<bool>(),
            moves in prop::collection::vec(prop::option::of(direction_strategy()), 1..200),
        ) {
            let mut state = running_state(12, 12, wall_mode, seed);
            let mut events = Vec::new();

            for proposal in moves {
                if let Some(d) = proposal {
                    state.direction.propose(d);
                }
                let before = state.snake.len();
                let score = state.score;
                let outcome = tick(&mut state, &mut events);

                if state.status != GameStatus::Running {
                    break;
                }
                prop_assert!(state.snake.is_consistent());
                prop_assert!(state.grid.in_bounds(state.snake.head));
                prop_assert!(state.snake.cells().all(|c| c != state.food));
                prop_assert!(!state.walls.occupies(state.food));
                match outcome {
                    TickOutcome::Ate => {
                        prop_assert_eq!(state.snake.len(), before + 1);
                        prop_assert_eq!(state.score, score + 1);
                    }
                    TickOutcome::Moved => {
                        prop_assert_eq!(state.snake.len(), before);
                        prop_assert_eq!(state.score, score);
                    }
                    _ => {}
                }
            }
        }

        /// A committed direction is never replaced by its exact opposite
        #[test]
        fn prop_commit_never_reverses(
            start in direction_strategy(),
            proposals in prop::collection::vec(direction_strategy(), 1..50),
        ) {
            let mut ctl = DirectionController::seeded(start);
            for p in proposals {
                let before = ctl.current();
                ctl.propose(p);
                let after = ctl.commit();
                prop_assert!(!after.is_opposite(before));
            }
        }
    }
}
