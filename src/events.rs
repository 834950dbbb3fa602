//! Input intents consumed by the simulation and the events it emits in return.

use bitflags::bitflags;

use crate::game::state::GameState;
use crate::map::direction::Direction;
use crate::systems::bonus::BonusSymbol;
use crate::systems::ghost::GhostId;

bitflags! {
    /// Everything the host asks of the simulation for one tick.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Intents: u16 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        /// Insert a credit and start a game from the intro.
        const START = 1 << 4;
        const TOGGLE_AUTOPILOT = 1 << 5;
        const KILL_ALL_GHOSTS = 1 << 6;
        const SKIP_LEVEL = 1 << 7;
        const TOGGLE_IMMUNE = 1 << 8;
        /// Expire the current state's timer.
        const FINISH_STATE = 1 << 9;
    }
}

impl Intents {
    /// The single direction consumed this tick. Up beats down beats left beats right.
    pub fn direction(self) -> Option<Direction> {
        [
            (Intents::UP, Direction::Up),
            (Intents::DOWN, Direction::Down),
            (Intents::LEFT, Direction::Left),
            (Intents::RIGHT, Direction::Right),
        ]
        .into_iter()
        .find_map(|(flag, dir)| self.contains(flag).then_some(dir))
    }
}

impl From<Direction> for Intents {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => Intents::UP,
            Direction::Down => Intents::DOWN,
            Direction::Left => Intents::LEFT,
            Direction::Right => Intents::RIGHT,
        }
    }
}

/// Things that happened during a tick, for audio and rendering collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten,
    EnergizerEaten,
    GhostEaten { ghost: GhostId, points: u32 },
    BonusActivated(BonusSymbol),
    BonusEaten { symbol: BonusSymbol, points: u32 },
    BonusExpired,
    ExtraLife,
    PacmanKilled,
    LevelComplete { level: u32 },
    HuntingPhaseStarted { phase: usize, scatter: bool },
    GameOver,
    StateChanged { from: GameState, to: GameState },
}
