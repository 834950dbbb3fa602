//! Read-only views of the simulation for rendering and audio collaborators.

use glam::{IVec2, Vec2};

use crate::game::level::{is_scatter_phase, level_data};
use crate::game::state::GameState;
use crate::game::Game;
use crate::map::direction::Direction;
use crate::map::food::FoodState;
use crate::systems::bonus::{BonusState, BonusSymbol};
use crate::systems::ghost::{Ghost, GhostId, GhostState};

#[derive(Debug, Clone, PartialEq)]
pub struct PacView {
    pub position: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    pub visible: bool,
    pub dead: bool,
    /// The dying animation is playing.
    pub dying: bool,
    pub power_remaining: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GhostView {
    pub id: GhostId,
    pub position: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    pub state: GhostState,
    pub visible: bool,
    pub flashing: bool,
    /// Points to display instead of the ghost, while it is eaten.
    pub bounty: Option<u32>,
    pub target_tile: Option<IVec2>,
    pub elroy: i8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BonusView {
    pub symbol: BonusSymbol,
    pub points: u32,
    pub state: BonusState,
    pub position: Vec2,
}

/// Everything a frame needs, captured after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub state: GameState,
    /// Ticks left in the current state, `None` while it runs indefinitely.
    pub state_remaining: Option<u32>,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub scatter: bool,
    pub pac: PacView,
    pub ghosts: [GhostView; 4],
    pub food: FoodState,
    pub bonus: BonusView,
    pub maze_flashing: bool,
}

impl Game {
    /// Captures the current state of the simulation.
    pub fn snapshot(&self) -> Snapshot {
        let num_flashes = level_data(self.session.level).num_flashes;
        let power_remaining = self.pac.power_remaining();
        let ghost_view = |ghost: &Ghost| GhostView {
            id: ghost.id,
            position: ghost.actor.position,
            tile: ghost.actor.tile(),
            direction: ghost.actor.move_dir,
            state: ghost.state,
            visible: ghost.actor.visible,
            flashing: ghost.is_flashing(power_remaining, num_flashes),
            bounty: ghost.bounty(),
            target_tile: ghost.actor.target_tile,
            elroy: ghost.elroy,
        };

        Snapshot {
            tick: self.tick,
            state: self.state,
            state_remaining: self.timer().remaining(),
            level: self.session.level,
            score: self.session.score,
            high_score: self.session.high_score.points,
            lives: self.session.lives,
            scatter: is_scatter_phase(self.session.hunting_phase),
            pac: PacView {
                position: self.pac.actor.position,
                tile: self.pac.actor.tile(),
                direction: self.pac.actor.move_dir,
                visible: self.pac.actor.visible,
                dead: self.pac.dead,
                dying: self.pac_dying_animation,
                power_remaining,
            },
            ghosts: self.ghosts.each_ref().map(ghost_view),
            food: self.food.clone(),
            bonus: BonusView {
                symbol: self.bonus.symbol,
                points: self.bonus.points,
                state: self.bonus.state,
                position: self.bonus.position(),
            },
            maze_flashing: self.maze_flashing,
        }
    }
}
