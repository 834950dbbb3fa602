//! Ghost identities and the per-ghost behavior state machine.

use glam::{IVec2, Vec2};
use rand::seq::IndexedRandom;
use rand::RngCore;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumCount};
use tracing::trace;

use crate::constants::{house, points, speed, timing, HALF_TILE, TILE_SIZE};
use crate::game::level::LevelData;
use crate::map::direction::Direction;
use crate::map::world::World;
use crate::systems::movement::{can_access, Access, Actor};
use crate::systems::targeting::{chase_target, direction_towards};
use crate::systems::timer::{TickTimer, TimerDuration};

/// The four ghosts, in the order the house releases them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, AsRefStr, Display)]
pub enum GhostId {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Blinky, GhostId::Pinky, GhostId::Inky, GhostId::Clyde];

    /// # Panics
    ///
    /// Panics if `index` is not in `0..=3`.
    pub fn from_index(index: usize) -> GhostId {
        match index {
            0 => GhostId::Blinky,
            1 => GhostId::Pinky,
            2 => GhostId::Inky,
            3 => GhostId::Clyde,
            _ => panic!("invalid ghost index {index}"),
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The corner tile the ghost retreats to while scattering.
    pub const fn scatter_tile(self) -> IVec2 {
        match self {
            GhostId::Blinky => IVec2::new(25, 0),
            GhostId::Pinky => IVec2::new(2, 0),
            GhostId::Inky => IVec2::new(27, 35),
            GhostId::Clyde => IVec2::new(0, 35),
        }
    }

    /// The tile the ghost starts each life on.
    pub const fn home_tile(self) -> IVec2 {
        match self {
            GhostId::Blinky => house::ENTRY_TILE,
            GhostId::Pinky => house::SEAT_CENTER,
            GhostId::Inky => house::SEAT_LEFT,
            GhostId::Clyde => house::SEAT_RIGHT,
        }
    }

    /// The seat the ghost returns to after being eaten.
    pub const fn revival_tile(self) -> IVec2 {
        match self {
            GhostId::Blinky => house::SEAT_CENTER,
            _ => self.home_tile(),
        }
    }

    pub const fn start_direction(self) -> Direction {
        match self {
            GhostId::Blinky => Direction::Left,
            GhostId::Pinky => Direction::Down,
            GhostId::Inky | GhostId::Clyde => Direction::Up,
        }
    }
}

/// Ghost behavior states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum GhostState {
    /// Waiting in (or, for Blinky, above) the house to be released.
    Locked,
    LeavingHouse,
    /// Scattering or chasing, depending on the hunting phase.
    HuntingPac,
    Frightened,
    /// Just eaten; shows its bounty and does not move.
    Eaten,
    ReturningToHouse,
    EnteringHouse,
}

/// Everything a ghost looks at while deciding its move.
#[derive(Debug, Clone, Copy)]
pub struct GhostContext<'a> {
    pub world: &'a World,
    pub level: &'a LevelData,
    pub pac_tile: IVec2,
    pub pac_facing: Direction,
    pub pac_has_power: bool,
    pub blinky_tile: IVec2,
    pub scatter: bool,
}

/// Pixel position of an actor sitting on `tile`, half a tile to the right.
pub fn seat_position(tile: IVec2) -> Vec2 {
    tile.as_vec2() * TILE_SIZE + Vec2::new(HALF_TILE, 0.0)
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub id: GhostId,
    pub actor: Actor,
    pub state: GhostState,
    /// Position of this ghost in the kill order of the current power phase.
    pub killed_index: Option<u8>,
    /// Private dot counter used for house release.
    pub dot_counter: u32,
    /// Cruise Elroy level. Only Blinky uses it; negative values are suspended levels.
    pub elroy: i8,
    bounty_timer: TickTimer,
}

impl Ghost {
    pub fn new(id: GhostId) -> Self {
        let mut ghost = Self {
            id,
            actor: Actor::default(),
            state: GhostState::Locked,
            killed_index: None,
            dot_counter: 0,
            elroy: 0,
            bounty_timer: TickTimer::default(),
        };
        ghost.reset();
        ghost
    }

    /// Puts the ghost back on its home tile, locked.
    pub fn reset(&mut self) {
        self.actor.place_at(self.id.home_tile(), Vec2::new(HALF_TILE, 0.0));
        self.actor.set_direction(self.id.start_direction());
        self.actor.reverse_requested = false;
        self.actor.target_tile = None;
        self.actor.speed = 0;
        self.state = GhostState::Locked;
        self.killed_index = None;
        self.bounty_timer = TickTimer::default();
    }

    pub fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            trace!(ghost = %self.id, from = %self.state, to = %state, "Ghost state transition");
            self.state = state;
        }
    }

    pub fn is(&self, state: GhostState) -> bool {
        self.state == state
    }

    pub fn is_inside_house(&self, world: &World) -> bool {
        world.house().contains(self.actor.tile())
    }

    /// Ghosts that can be eaten or that can kill Pac-Man react to Pac-Man's power.
    pub fn frighten(&mut self) {
        if matches!(self.state, GhostState::HuntingPac | GhostState::Frightened) {
            self.set_state(GhostState::Frightened);
            self.actor.request_reverse();
        }
    }

    /// Marks the ghost as eaten as the `index`-th kill of the current power phase.
    pub fn kill(&mut self, index: u8) {
        self.killed_index = Some(index);
        self.actor.speed = 0;
        self.actor.target_tile = None;
        self.bounty_timer.start(TimerDuration::Ticks(timing::GHOST_BOUNTY));
        self.set_state(GhostState::Eaten);
    }

    /// Points shown while the ghost is eaten.
    pub fn bounty(&self) -> Option<u32> {
        match (self.state, self.killed_index) {
            (GhostState::Eaten, Some(index)) => Some(points::FIRST_GHOST << index),
            _ => None,
        }
    }

    /// Ends the bounty display of an eaten ghost early.
    pub fn finish_bounty(&mut self) {
        if self.state == GhostState::Eaten {
            self.set_state(GhostState::ReturningToHouse);
        }
    }

    pub fn suspend_elroy(&mut self) {
        if self.elroy > 0 {
            self.elroy = -self.elroy;
            trace!(elroy = self.elroy, "Cruise Elroy suspended");
        }
    }

    pub fn resume_elroy(&mut self) {
        if self.elroy < 0 {
            self.elroy = -self.elroy;
            trace!(elroy = self.elroy, "Cruise Elroy resumed");
        }
    }

    /// Whether the ghost should be drawn flashing given Pac-Man's remaining power.
    pub fn is_flashing(&self, power_remaining: u32, num_flashes: u32) -> bool {
        self.state == GhostState::Frightened && power_remaining > 0 && power_remaining <= num_flashes * timing::GHOST_FLASH
    }

    /// Runs one tick of the ghost's behavior.
    pub fn update(&mut self, ctx: &GhostContext, rng: &mut dyn RngCore) {
        match self.state {
            GhostState::Locked => self.bounce(ctx.world),
            GhostState::LeavingHouse => self.leave_house(ctx),
            GhostState::HuntingPac => self.hunt(ctx),
            GhostState::Frightened => self.wander(ctx, rng),
            GhostState::Eaten => self.update_bounty(),
            GhostState::ReturningToHouse => self.return_to_house(ctx),
            GhostState::EnteringHouse => self.enter_house(ctx),
        }
    }

    /// Ticks the bounty display, sending the ghost home when it ends.
    pub fn update_bounty(&mut self) {
        self.bounty_timer.tick();
        if self.bounty_timer.expired() {
            self.finish_bounty();
        }
    }

    fn bounce(&mut self, world: &World) {
        if !self.is_inside_house(world) {
            return;
        }
        self.actor.speed = speed::INSIDE_HOUSE;
        let center_y = self.id.revival_tile().y as f32 * TILE_SIZE;
        if self.actor.position.y <= center_y - 2.0 {
            self.actor.set_direction(Direction::Down);
        } else if self.actor.position.y >= center_y + 2.0 {
            self.actor.set_direction(Direction::Up);
        }
        if self.actor.move_dir.is_vertical() {
            self.actor.position += self.actor.move_dir.as_vec2() * self.actor.pixels_per_tick();
        }
    }

    fn leave_house(&mut self, ctx: &GhostContext) {
        self.actor.speed = speed::INSIDE_HOUSE;
        let exit = seat_position(ctx.world.house().entry_tile);
        if self.move_towards(exit, true) {
            self.actor.set_direction(Direction::Left);
            self.actor.new_tile_entered = true;
            let next = if ctx.pac_has_power && self.killed_index.is_none() {
                GhostState::Frightened
            } else {
                GhostState::HuntingPac
            };
            self.set_state(next);
        }
    }

    fn hunt(&mut self, ctx: &GhostContext) {
        let tile = self.actor.tile();
        self.actor.speed = if ctx.world.is_tunnel(tile) {
            ctx.level.ghost_tunnel_speed
        } else {
            match (self.id, self.elroy) {
                (GhostId::Blinky, 1) => ctx.level.elroy1_speed,
                (GhostId::Blinky, 2) => ctx.level.elroy2_speed,
                _ => ctx.level.ghost_speed,
            }
        };

        let chasing = !ctx.scatter || (self.id == GhostId::Blinky && self.elroy > 0);
        let target = if chasing {
            chase_target(self.id, ctx.pac_tile, ctx.pac_facing, ctx.blinky_tile, tile)
        } else {
            self.id.scatter_tile()
        };
        self.actor.target_tile = Some(target);

        if self.actor.new_tile_entered || self.actor.stuck {
            if let Some(dir) = direction_towards(ctx.world, &self.actor, target, Access::REVERSE, true) {
                self.actor.wish_dir = dir;
            }
        }
        self.actor.try_move(ctx.world, Access::REVERSE);
    }

    fn wander(&mut self, ctx: &GhostContext, rng: &mut dyn RngCore) {
        self.actor.speed = if ctx.world.is_tunnel(self.actor.tile()) {
            ctx.level.ghost_tunnel_speed
        } else {
            ctx.level.ghost_frightened_speed
        };
        self.actor.target_tile = None;

        if self.actor.new_tile_entered || self.actor.stuck {
            if let Some(dir) = self.random_direction(ctx.world, rng) {
                self.actor.wish_dir = dir;
            }
        }
        self.actor.try_move(ctx.world, Access::REVERSE);
    }

    /// A random accessible direction that does not reverse. Random choices are only made at
    /// intersections; elsewhere there is at most one way to go.
    fn random_direction(&self, world: &World, rng: &mut dyn RngCore) -> Option<Direction> {
        let tile = self.actor.tile();
        if world.is_portal(tile) {
            return None;
        }
        let reverse = self.actor.move_dir.opposite();
        let options: SmallVec<[Direction; 4]> = Direction::DIRECTIONS
            .into_iter()
            .filter(|&dir| dir != reverse && can_access(world, tile + dir.as_ivec2(), Access::empty()))
            .collect();

        if world.is_intersection(tile) {
            options.choose(rng).copied()
        } else {
            options.first().copied()
        }
    }

    fn return_to_house(&mut self, ctx: &GhostContext) {
        self.actor.speed = ctx.level.ghost_speed * 2;
        let entry = ctx.world.house().entry_tile;
        let exit = seat_position(entry);

        let position = self.actor.position;
        if self.actor.tile().y == entry.y && position.y == exit.y && (position.x - exit.x).abs() <= self.actor.pixels_per_tick() {
            self.actor.position = exit;
            self.actor.set_direction(Direction::Down);
            self.actor.target_tile = None;
            self.set_state(GhostState::EnteringHouse);
            return;
        }

        self.actor.target_tile = Some(entry);
        if self.actor.new_tile_entered || self.actor.stuck {
            if let Some(dir) = direction_towards(ctx.world, &self.actor, entry, Access::empty(), false) {
                self.actor.wish_dir = dir;
            }
        }
        self.actor.try_move(ctx.world, Access::empty());
    }

    fn enter_house(&mut self, ctx: &GhostContext) {
        self.actor.speed = ctx.level.ghost_speed * 2;
        let seat = seat_position(self.id.revival_tile());
        if self.move_towards(seat, false) {
            self.actor.set_direction(Direction::Up);
            self.actor.new_tile_entered = true;
            self.set_state(GhostState::Locked);
        }
    }

    /// Moves straight toward `destination` one axis at a time without overshooting.
    /// Returns whether the destination has been reached.
    fn move_towards(&mut self, destination: Vec2, horizontal_first: bool) -> bool {
        let delta = destination - self.actor.position;
        let horizontal = match delta.x {
            x if x < 0.0 => Some(Direction::Left),
            x if x > 0.0 => Some(Direction::Right),
            _ => None,
        };
        let vertical = match delta.y {
            y if y < 0.0 => Some(Direction::Up),
            y if y > 0.0 => Some(Direction::Down),
            _ => None,
        };
        let next = if horizontal_first {
            horizontal.or(vertical)
        } else {
            vertical.or(horizontal)
        };

        let Some(dir) = next else {
            return true;
        };
        let distance = if dir.is_horizontal() { delta.x.abs() } else { delta.y.abs() };
        self.actor.set_direction(dir);
        self.actor.position += dir.as_vec2() * self.actor.pixels_per_tick().min(distance);
        self.actor.position == destination
    }
}
