//! Pocket Snake entry point
//!
//! Native builds run a headless game on a virtual clock with a greedy
//! autopilot, record the result and print the leaderboard. The playable
//! build embeds the library in a touch front end.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pocket_snake::consts::MAX_HISTORY;
    use pocket_snake::input::TouchEvent;
    use pocket_snake::manhattan;
    use pocket_snake::persistence::FileStorage;
    use pocket_snake::sim::{Direction, GameEvent, Grid, Snapshot};
    use pocket_snake::{Observer, ScoreKeeper, Session, Settings, SpeedLevel};

    /// Safety net in case the autopilot circles forever
    const MAX_TICKS: u64 = 20_000;
    const STORAGE_DIR: &str = ".pocket-snake";

    struct Args {
        seed: u64,
        walls: bool,
        speed: Option<SpeedLevel>,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            seed: rand::random(),
            walls: false,
            speed: None,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--walls" => args.walls = true,
                "--speed" => {
                    args.speed = iter.next().as_deref().and_then(SpeedLevel::from_str);
                    if args.speed.is_none() {
                        log::warn!("Unknown speed, expected slow|normal|fast");
                    }
                }
                other => match other.parse() {
                    Ok(seed) => args.seed = seed,
                    Err(_) => log::warn!("Ignoring argument {:?}", other),
                },
            }
        }
        args
    }

    /// Logs game events as they happen
    struct EventLog;

    impl Observer for EventLog {
        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Started => log::info!("Started"),
                GameEvent::ScoreUpdate { score } => log::debug!("Score {}", score),
                GameEvent::FoodEaten { cell } => log::debug!("Ate at ({}, {})", cell.x, cell.y),
                GameEvent::GameOver { final_score, cause } => {
                    log::info!("Game over: {:?}, score {}", cause, final_score)
                }
            }
        }

        fn on_snapshot(&mut self, snapshot: &Snapshot) {
            log::trace!(
                "tick {} head ({}, {}) len {}",
                snapshot.tick,
                snapshot.head.x,
                snapshot.head.y,
                snapshot.body.len()
            );
        }
    }

    /// Greedy move toward the food that doesn't die next tick
    fn autopilot(snapshot: &Snapshot, grid: &Grid) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(snapshot.direction) || snapshot.body.is_empty())
            .filter(|d| {
                let next = snapshot.head + d.delta();
                grid.in_bounds(next) && !snapshot.body.contains(&next) && !snapshot.walls.contains(&next)
            })
            .min_by_key(|d| manhattan(snapshot.head + d.delta(), snapshot.food))
    }

    pub fn run() {
        env_logger::init();
        let args = parse_args();

        let storage = FileStorage::new(STORAGE_DIR);
        let mut settings = Settings::load(&storage);
        if let Some(speed) = args.speed {
            settings.speed = speed;
        }
        settings.wall_mode |= args.walls;

        let grid = Grid::default();
        let config = settings.to_config(grid, args.seed);
        let mut session = match Session::new(&config) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
        };
        log::info!(
            "Pocket Snake (headless) seed {} speed {} walls {}",
            args.seed,
            settings.speed.as_str(),
            settings.wall_mode
        );

        let mut observers = (ScoreKeeper::new(storage), EventLog);
        let mut now = 0;
        session.handle_touch(&TouchEvent::start(0.0, 0.0, 1), now, &mut observers);
        session.handle_touch(&TouchEvent::end(0.0, 0.0, 0), now, &mut observers);

        while let Some(deadline) = session.next_deadline() {
            if session.snapshot().tick >= MAX_TICKS {
                log::warn!("Tick limit reached, recording the game as it stands");
                session.stop();
                observers.0.record(session.score());
                break;
            }
            if let Some(direction) = autopilot(&session.snapshot(), &grid) {
                session.propose(direction);
            }
            now = deadline;
            session.advance(now, &mut observers);
        }

        let (keeper, _) = observers;
        let snapshot = session.snapshot();
        println!(
            "Final score {} after {} ticks ({} ms simulated)",
            snapshot.score, snapshot.tick, now
        );
        if let Some(outcome) = keeper.last_outcome() {
            if outcome.new_high_score {
                println!("New high score!");
            }
        }

        let records = keeper.records();
        println!(
            "High score {} | {} games, {} apples",
            records.high_score, records.stats.total_games, records.stats.total_apples
        );
        println!("Last {} games, best first:", MAX_HISTORY);
        for (rank, entry) in records.leaderboard().iter().enumerate() {
            println!("{:>2}. {:>4}", rank + 1, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front end drives the library directly
}
