//! The actors of the simulation and the rules that move them.

pub mod bonus;
pub mod ghost;
pub mod movement;
pub mod player;
pub mod targeting;
pub mod timer;
