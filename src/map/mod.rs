//! This module defines the maze and provides functions for interacting with it.

pub mod direction;
pub mod food;
pub mod layout;
pub mod parser;
pub mod world;
