use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::Deserialize;

/// Host-side settings for a simulation run.
///
/// Arcade data (speeds, timings, the maze) is fixed and deliberately not part of this.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the random source driving frightened ghosts and bonus lifetimes.
    pub seed: u64,
    /// Lives at the start of a game.
    pub lives: u32,
    /// Score at which the single extra life is awarded.
    pub extra_life_score: u32,
    /// Level a new game starts on.
    pub start_level: u32,
    pub immune: bool,
    pub autopilot: bool,
    /// Where to keep the high score. Kept in memory only when unset.
    pub high_score_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            lives: 3,
            extra_life_score: crate::constants::points::EXTRA_LIFE,
            start_level: 1,
            immune: false,
            autopilot: false,
            high_score_path: None,
        }
    }
}

impl GameConfig {
    /// Loads the configuration from `PACMAN_*` environment variables, e.g. `PACMAN_SEED=42`.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::from_figment(Figment::new().merge(Env::prefixed("PACMAN_")))
    }

    /// Extracts and validates a configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let config: GameConfig = figment.extract()?;
        if config.start_level == 0 {
            return Err(figment::Error::from("start_level must be at least 1".to_string()));
        }
        Ok(config)
    }
}
