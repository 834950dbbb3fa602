//! Centralized error types for the simulation core.
//!
//! The simulation itself has no recoverable failures; these types cover the
//! edges where data enters the core (map layouts, configuration, the
//! high-score store).

use std::io;

/// Main error type for the crate.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
    #[error("Board must be {expected_width}x{expected_height} tiles, found row {row} with width {width}")]
    InvalidDimensions {
        expected_width: usize,
        expected_height: usize,
        row: usize,
        width: usize,
    },
    #[error("Board has {0} rows")]
    InvalidRowCount(usize),
    #[error("Pac-Man's starting position not found")]
    MissingPacStart,
    #[error("Tunnel row {0} does not reach both edges of the board")]
    UnpairedPortal(i32),
}

/// Errors raised by high-score stores.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed high score record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fallible operations.
pub type GameResult<T> = Result<T, GameError>;
