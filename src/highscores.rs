//! High score, recent history and lifetime stats
//!
//! Persisted as one JSON record. `ScoreKeeper` listens for game-over events
//! and keeps it up to date.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY;
use crate::persistence::{Storage, load_json, save_json};
use crate::platform::now_ms;
use crate::session::Observer;
use crate::sim::GameEvent;

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub score: u32,
    /// Unix timestamp (ms) when the game ended
    pub timestamp: f64,
}

/// Lifetime counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_apples: u64,
    pub total_games: u64,
}

/// What recording a game changed, for the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    pub score: u32,
    pub previous_high_score: u32,
    /// Score reached (or tied) a positive record
    pub new_high_score: bool,
}

/// Persisted records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub high_score: u32,
    /// Most recent first, at most `MAX_HISTORY` entries
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub stats: GlobalStats,
}

impl Records {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snake_records";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game
    pub fn record_game(&mut self, score: u32, timestamp: f64) -> RecordOutcome {
        let previous_high_score = self.high_score;
        if score > self.high_score {
            self.high_score = score;
        }

        self.history.insert(0, HistoryEntry { score, timestamp });
        self.history.truncate(MAX_HISTORY);

        self.stats.total_apples += u64::from(score);
        self.stats.total_games += 1;

        RecordOutcome {
            score,
            previous_high_score,
            new_high_score: score > 0 && score >= previous_high_score,
        }
    }

    /// History for display: best first, ties most recent first
    pub fn leaderboard(&self) -> Vec<HistoryEntry> {
        let mut entries = self.history.clone();
        // Stable sort keeps the recency order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Load records, starting fresh on missing or unreadable data
    pub fn load(storage: &impl Storage) -> Self {
        match load_json::<Self>(storage, Self::STORAGE_KEY) {
            Ok(Some(records)) => {
                log::info!("Loaded {} history entries", records.history.len());
                records
            }
            Ok(None) => {
                log::info!("No records found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Records unreadable, starting fresh: {}", e);
                Self::new()
            }
        }
    }

    /// Save records; failures are logged, never fatal
    pub fn save(&self, storage: &mut impl Storage) {
        match save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Records saved ({} entries)", self.history.len()),
            Err(e) => log::warn!("Failed to save records: {}", e),
        }
    }
}

/// Game-over subscriber that keeps the persisted records current
pub struct ScoreKeeper<S: Storage> {
    storage: S,
    records: Records,
    last_outcome: Option<RecordOutcome>,
    clock: fn() -> f64,
}

impl<S: Storage> ScoreKeeper<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, now_ms)
    }

    /// Keeper stamping history entries with a custom clock
    pub fn with_clock(storage: S, clock: fn() -> f64) -> Self {
        let records = Records::load(&storage);
        Self {
            storage,
            records,
            last_outcome: None,
            clock,
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Result of the most recent game-over
    pub fn last_outcome(&self) -> Option<RecordOutcome> {
        self.last_outcome
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clear_history(&mut self) {
        self.records.clear_history();
        self.records.save(&mut self.storage);
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Record a finished game and persist the records. Game-over events go
    /// through here; hosts call it directly for games cut short by `stop`.
    pub fn record(&mut self, score: u32) -> RecordOutcome {
        let outcome = self.records.record_game(score, (self.clock)());
        if outcome.new_high_score {
            log::info!("New high score: {}", score);
        }
        self.last_outcome = Some(outcome);
        self.records.save(&mut self.storage);
        outcome
    }
}

impl<S: Storage> Observer for ScoreKeeper<S> {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::GameOver { final_score, .. } = *event {
            self.record(final_score);
        }
    }
}
