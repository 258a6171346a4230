//! Game session driver
//!
//! Wraps one `GameState` with everything time-related: the fixed-rate tick
//! clock, the touch-pressure debounce timer and input translation. The host
//! supplies a monotonic millisecond clock by calling `advance` and
//! `handle_touch`; nothing here sleeps or reads the wall clock.
//!
//! Input only writes the pending direction and pressure state. The board is
//! mutated only inside a tick. Resetting replaces the whole session, so no
//! timer survives into the next game.

use crate::config::{ConfigError, GameConfig};
use crate::consts::MAX_CATCH_UP_TICKS;
use crate::input::{SwipeTracker, TouchEvent, TouchPhase};
use crate::sim::{
    Direction, GameEvent, GameState, GameStatus, Snapshot, SpeedController, TouchPressure, tick,
};

/// Subscriber for session output
pub trait Observer {
    fn on_event(&mut self, event: &GameEvent);

    /// Called once per tick with the post-tick board
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}
}

impl Observer for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl<A: Observer, B: Observer> Observer for (A, B) {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.0.on_snapshot(snapshot);
        self.1.on_snapshot(snapshot);
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        (**self).on_snapshot(snapshot);
    }
}

/// Fixed-rate clock on the host's millisecond timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickClock {
    next_due: Option<u64>,
}

impl TickClock {
    /// First tick fires one interval after `now`
    pub fn start(&mut self, now: u64, interval_ms: u64) {
        self.next_due = Some(now.saturating_add(interval_ms));
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// Re-arm with a new interval counted from `now`; no-op while stopped
    pub fn reschedule(&mut self, now: u64, interval_ms: u64) {
        if self.next_due.is_some() {
            self.start(now, interval_ms);
        }
    }
}

/// One game from reset to game over
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    speed: SpeedController,
    pressure: TouchPressure,
    swipe: SwipeTracker,
    clock: TickClock,
    active_interval_ms: u64,
    /// Latest time seen; input and ticks never move backwards
    now: u64,
    /// Set by `stop`; input and time are ignored from then on
    stopped: bool,
    scratch: Vec<GameEvent>,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        let speed = SpeedController::with_multipliers(
            config.base_interval_ms(),
            config.one_touch_multiplier,
            config.multi_touch_multiplier,
        );
        let pressure = TouchPressure::new();
        let active_interval_ms = speed.active_interval(&pressure);
        Ok(Self {
            state,
            speed,
            pressure,
            swipe: SwipeTracker::default(),
            clock: TickClock::default(),
            active_interval_ms,
            now: 0,
            stopped: false,
            scratch: Vec::new(),
        })
    }

    /// Throw this game away and start a fresh one
    pub fn reset(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        self.stop();
        *self = Session::new(config)?;
        log::info!("Session reset");
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn base_interval_ms(&self) -> u64 {
        self.speed.base_ms()
    }

    pub fn active_interval_ms(&self) -> u64 {
        self.active_interval_ms
    }

    /// `stop` was called or the game ended
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pressure(&self) -> &TouchPressure {
        &self.pressure
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Earliest time something is scheduled (tick or pressure timer)
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.clock.next_due(), self.pressure.timer().deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Idle -> Running. The first tick fires one active interval from `now`.
    pub fn start(&mut self, now: u64, observer: &mut impl Observer) -> bool {
        self.now = self.now.max(now);
        if self.stopped || !self.state.start() {
            return false;
        }
        self.clock.start(self.now, self.active_interval_ms);
        log::info!(
            "Session started (seed {}, interval {} ms)",
            self.state.seed,
            self.active_interval_ms
        );
        observer.on_event(&GameEvent::Started);
        true
    }

    /// Queue a direction for the next tick (keyboard or programmatic input)
    pub fn propose(&mut self, direction: Direction) {
        if !self.stopped && self.state.status != GameStatus::GameOver {
            self.state.direction.propose(direction);
        }
    }

    /// Feed a touch event. Catches the simulation up to `now` first so the
    /// input lands between the right ticks.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: u64, observer: &mut impl Observer) {
        if self.stopped {
            return;
        }
        self.advance(now, observer);

        match self.state.status {
            GameStatus::Idle => {
                // First contact only starts the game
                if event.phase == TouchPhase::Start {
                    self.start(now, observer);
                }
            }
            GameStatus::Running => {
                if let Some(direction) = self.swipe.handle(event) {
                    log::debug!("Swipe {:?}", direction);
                    self.state.direction.propose(direction);
                }
                self.pressure.set_touch_count(event.touches, self.now);
                self.refresh_interval(self.now);
            }
            GameStatus::GameOver => {}
        }
    }

    /// Run every tick and timer due up to `now`, in time order. Returns the
    /// number of ticks run.
    pub fn advance(&mut self, now: u64, observer: &mut impl Observer) -> u32 {
        let now = self.now.max(now);
        let mut ticks = 0;
        if self.stopped {
            return ticks;
        }

        while self.state.is_running() {
            let timer_due = self.pressure.timer().deadline().filter(|&t| t <= now);
            let tick_due = self.clock.next_due().filter(|&t| t <= now);

            match (timer_due, tick_due) {
                (Some(t), due) if due.is_none_or(|d| t <= d) => {
                    self.pressure.poll(t);
                    self.refresh_interval(t);
                }
                (_, Some(at)) => {
                    if ticks >= MAX_CATCH_UP_TICKS {
                        log::warn!("Tick backlog at {} ms, dropping it", now);
                        self.clock.start(now, self.active_interval_ms);
                        break;
                    }
                    self.run_tick(at, observer);
                    ticks += 1;
                }
                _ => break,
            }
        }

        self.now = now;
        ticks
    }

    /// Halt the tick clock and pressure timer. Nothing fires afterwards and
    /// later input is ignored until `reset`.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.clock.stop();
        self.pressure.release();
        self.swipe.reset();
    }

    fn run_tick(&mut self, at: u64, observer: &mut impl Observer) {
        let mut events = std::mem::take(&mut self.scratch);
        events.clear();

        tick(&mut self.state, &mut events);

        for event in &events {
            observer.on_event(event);
        }
        observer.on_snapshot(&self.state.snapshot());
        self.scratch = events;

        if self.state.is_running() {
            self.clock.start(at, self.active_interval_ms);
        } else {
            self.stop();
        }
    }

    fn refresh_interval(&mut self, at: u64) {
        let interval = self.speed.active_interval(&self.pressure);
        if interval != self.active_interval_ms {
            log::debug!("Tick interval {} -> {} ms", self.active_interval_ms, interval);
            self.active_interval_ms = interval;
            self.clock.reschedule(at, interval);
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
