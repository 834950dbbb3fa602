//! High-score records and the stores they are kept in.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::PersistenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub points: u32,
    pub level: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub achieved_at: OffsetDateTime,
}

impl Default for HighScore {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            achieved_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

/// Somewhere a high score can be loaded from and saved to.
pub trait HighScoreStore {
    /// Returns the stored record, or `None` if nothing has been saved yet.
    fn load(&mut self) -> Result<Option<HighScore>, PersistenceError>;
    fn save(&mut self, record: &HighScore) -> Result<(), PersistenceError>;
}

/// Keeps the record in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Arc<Mutex<Option<HighScore>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScore) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
        }
    }

    pub fn record(&self) -> Option<HighScore> {
        *self.record.lock()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<HighScore>, PersistenceError> {
        Ok(self.record())
    }

    fn save(&mut self, record: &HighScore) -> Result<(), PersistenceError> {
        *self.record.lock() = Some(*record);
        Ok(())
    }
}

/// Keeps the record in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<HighScore>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&mut self, record: &HighScore) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}
