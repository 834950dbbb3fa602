//! A tick-exact Pac-Man arcade simulation core.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod logging;
pub mod map;
pub mod sync;
pub mod systems;
