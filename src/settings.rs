//! Game settings and preferences
//!
//! Persisted separately from records under their own storage key.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::highscores::Records;
use crate::persistence::{Storage, StorageError, load_json, save_json};
use crate::sim::Grid;

pub use crate::sim::SpeedLevel;

/// Player preferences that shape the next session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Base snake speed
    #[serde(default)]
    pub speed: SpeedLevel,
    /// Procedural walls after every apple
    #[serde(default)]
    pub wall_mode: bool,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snake_settings";

    /// Build the configuration for a new session
    pub fn to_config(&self, grid: Grid, seed: u64) -> GameConfig {
        GameConfig {
            grid,
            speed: self.speed,
            wall_mode: self.wall_mode,
            seed,
            ..Default::default()
        }
    }

    pub fn toggle_wall_mode(&mut self) {
        self.wall_mode = !self.wall_mode;
    }

    /// Load settings, falling back to defaults on missing or unreadable data
    pub fn load(storage: &impl Storage) -> Self {
        match load_json(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unreadable, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged, never fatal
    pub fn save(&self, storage: &mut impl Storage) {
        match save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    /// Wipe settings and every record
    pub fn reset_all(storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.remove(Self::STORAGE_KEY)?;
        storage.remove(Records::STORAGE_KEY)?;
        log::info!("All settings and records cleared");
        Ok(())
    }
}
