//! Pac-Man's state and the autopilot that can steer him.

use glam::{IVec2, Vec2};
use pathfinding::prelude::bfs;
use smallvec::SmallVec;

use crate::constants::HALF_TILE;
use crate::game::level::LevelData;
use crate::map::direction::Direction;
use crate::map::food::FoodState;
use crate::map::world::World;
use crate::systems::movement::{can_access, Access, Actor};
use crate::systems::timer::{TickTimer, TimerDuration};

#[derive(Debug, Clone)]
pub struct Pac {
    pub actor: Actor,
    pub dead: bool,
    /// Ticks Pac-Man stands still after eating.
    pub rest_ticks: u32,
    /// Ticks since Pac-Man last ate something.
    pub starving_ticks: u32,
    pub power_timer: TickTimer,
    /// Ghosts cannot kill an immune Pac-Man.
    pub immune: bool,
    pub autopilot: bool,
}

impl Pac {
    pub fn new(world: &World) -> Self {
        let mut pac = Self {
            actor: Actor::default(),
            dead: false,
            rest_ticks: 0,
            starving_ticks: 0,
            power_timer: TickTimer::default(),
            immune: false,
            autopilot: false,
        };
        pac.reset(world);
        pac
    }

    /// Puts Pac-Man back on his start tile, facing left, with no power.
    pub fn reset(&mut self, world: &World) {
        self.actor.place_at(world.pacman_start(), Vec2::new(HALF_TILE, 0.0));
        self.actor.set_direction(Direction::Left);
        self.actor.reverse_requested = false;
        self.actor.target_tile = None;
        self.actor.speed = 0;
        self.dead = false;
        self.rest_ticks = 0;
        self.starving_ticks = 0;
        self.power_timer = TickTimer::default();
    }

    pub fn has_power(&self) -> bool {
        self.power_timer.is_running()
    }

    /// Ticks of power left, zero when powerless.
    pub fn power_remaining(&self) -> u32 {
        self.power_timer.remaining().unwrap_or(0)
    }

    pub fn start_power(&mut self, ticks: u32) {
        self.power_timer.start(TimerDuration::Ticks(ticks));
    }

    /// Moves Pac-Man one tick, unless he is resting.
    ///
    /// `wish` is the direction requested this tick, if any. With the autopilot enabled the
    /// requested direction is ignored and the route to the nearest food is followed.
    pub fn update(&mut self, world: &World, level: &LevelData, food: &FoodState, wish: Option<Direction>) {
        // A direction requested while resting is kept for when Pac-Man moves again.
        if let Some(dir) = wish.filter(|_| !self.autopilot) {
            self.actor.wish_dir = dir;
        }
        if self.rest_ticks > 0 {
            self.rest_ticks -= 1;
            return;
        }

        self.actor.speed = if self.has_power() {
            level.pac_powered_speed
        } else {
            level.pac_speed
        };

        if self.autopilot && (self.actor.new_tile_entered || self.actor.stuck) {
            if let Some(dir) = route_to_food(world, food, self.actor.tile()) {
                self.actor.wish_dir = dir;
            }
        }

        self.actor.try_move(world, Access::empty());
    }
}

fn successors(world: &World, tile: IVec2) -> SmallVec<[IVec2; 5]> {
    let mut next: SmallVec<[IVec2; 5]> = Direction::DIRECTIONS
        .into_iter()
        .map(|dir| tile + dir.as_ivec2())
        .filter(|&neighbor| can_access(world, neighbor, Access::empty()))
        .collect();
    for portal in world.portals() {
        if tile == portal.left {
            next.push(portal.right);
        } else if tile == portal.right {
            next.push(portal.left);
        }
    }
    next
}

/// The first step of a shortest path from `from` to the nearest uneaten food tile.
///
/// Returns `None` when no food is left, when Pac-Man already stands on food, or when the
/// first step wraps through a portal and no turn is needed.
pub fn route_to_food(world: &World, food: &FoodState, from: IVec2) -> Option<Direction> {
    let has_food = |tile: &IVec2| world.food_index(*tile).is_some_and(|index| !food.is_eaten(index));
    let path = bfs(&from, |&tile| successors(world, tile), has_food)?;
    let step = *path.get(1)? - from;
    Direction::DIRECTIONS.into_iter().find(|dir| dir.as_ivec2() == step)
}
