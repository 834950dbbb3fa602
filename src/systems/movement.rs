//! Tile-grid movement shared by Pac-Man and the ghosts.
//!
//! Positions are the top-left corner of an actor's 8x8 box in pixels. The tile an actor
//! occupies is the one containing the center of that box, and its offset is the distance
//! of the box from that tile's origin, always within `[-4, 4)` on each axis.

use bitflags::bitflags;
use glam::{IVec2, Vec2};

use crate::constants::{BASE_SPEED, HALF_TILE, TILE_SIZE};
use crate::map::direction::Direction;
use crate::map::parser::MapTile;
use crate::map::world::World;

bitflags! {
    /// What an actor is allowed to do while moving.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// May walk through the ghost house door.
        const DOOR = 1 << 0;
        /// May honor a pending reverse request.
        const REVERSE = 1 << 1;
    }
}

/// Returns the tile containing the center of a box at `position`.
pub fn tile_of(position: Vec2) -> IVec2 {
    ((position + HALF_TILE) / TILE_SIZE).floor().as_ivec2()
}

/// Whether an actor with the given access may occupy `tile`.
///
/// Portal tiles beyond the board edges are always accessible, anything else off the
/// board never is.
pub fn can_access(world: &World, tile: IVec2, access: Access) -> bool {
    if world.is_portal(tile) {
        return true;
    }
    if !world.inside(tile) {
        return false;
    }
    match world.tile(tile) {
        MapTile::Wall => false,
        MapTile::Door => access.contains(Access::DOOR),
        _ => true,
    }
}

/// Pixels covered in one tick at `percent` of the base speed.
pub fn pixels_per_tick(percent: u16) -> f32 {
    f32::from(percent) * BASE_SPEED / 100.0
}

/// The motion state common to every creature in the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    /// The direction the actor is currently moving in.
    pub move_dir: Direction,
    /// The direction the actor wants to move in as soon as possible.
    pub wish_dir: Direction,
    /// Speed as a percentage of [`BASE_SPEED`].
    pub speed: u16,
    pub visible: bool,
    pub new_tile_entered: bool,
    pub stuck: bool,
    pub teleported: bool,
    pub reverse_requested: bool,
    pub target_tile: Option<IVec2>,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            move_dir: Direction::Left,
            wish_dir: Direction::Left,
            speed: 0,
            visible: false,
            new_tile_entered: true,
            stuck: false,
            teleported: false,
            reverse_requested: false,
            target_tile: None,
        }
    }
}

impl Actor {
    pub fn tile(&self) -> IVec2 {
        tile_of(self.position)
    }

    pub fn offset(&self) -> Vec2 {
        self.position - self.tile().as_vec2() * TILE_SIZE
    }

    /// Puts the actor at `tile` with the given pixel offset.
    pub fn place_at(&mut self, tile: IVec2, offset: Vec2) {
        self.position = tile.as_vec2() * TILE_SIZE + offset;
        self.new_tile_entered = true;
        self.stuck = false;
        self.teleported = false;
    }

    pub fn set_direction(&mut self, dir: Direction) {
        self.move_dir = dir;
        self.wish_dir = dir;
    }

    pub fn pixels_per_tick(&self) -> f32 {
        pixels_per_tick(self.speed)
    }

    /// Asks the actor to turn around at the next opportunity.
    pub fn request_reverse(&mut self) {
        self.reverse_requested = true;
    }

    /// Moves the actor by one tick at its current speed.
    ///
    /// Tries the wish direction first and falls back to continuing straight. An actor
    /// that can do neither is marked stuck, which is a normal outcome.
    pub fn try_move(&mut self, world: &World, access: Access) {
        self.teleported = false;
        let tile = self.tile();

        for portal in world.portals() {
            let exit = match self.move_dir {
                Direction::Right if tile == portal.right => Some(portal.left),
                Direction::Left if tile == portal.left => Some(portal.right),
                _ => None,
            };
            if let Some(exit) = exit {
                let offset = self.offset();
                self.position = exit.as_vec2() * TILE_SIZE + offset;
                self.teleported = true;
                self.new_tile_entered = true;
                return;
            }
        }

        if self.reverse_requested && access.contains(Access::REVERSE) && (self.new_tile_entered || self.stuck) {
            self.wish_dir = self.move_dir.opposite();
            self.reverse_requested = false;
        }

        let moved = if self.step(world, self.wish_dir, access) {
            self.move_dir = self.wish_dir;
            true
        } else {
            self.step(world, self.move_dir, access)
        };

        self.stuck = !moved;
        self.new_tile_entered = self.tile() != tile;
    }

    /// Attempts a single step in `dir`, returning whether the actor moved that way.
    fn step(&mut self, world: &World, dir: Direction, access: Access) -> bool {
        let tile = self.tile();
        let mut offset = self.offset();
        let pixels = self.pixels_per_tick();
        let neighbor_open = can_access(world, tile + dir.as_ivec2(), access);

        // Turning only succeeds close to the lane center; faster actors get a wider window
        // so they cannot jump across it.
        if neighbor_open {
            let window = f32::max(1.0, pixels / 2.0);
            let cross = if dir.is_horizontal() { &mut offset.y } else { &mut offset.x };
            if cross.abs() > window {
                return false;
            }
            *cross = 0.0;
        }

        let new_position = tile.as_vec2() * TILE_SIZE + offset + dir.as_vec2() * pixels;
        if !can_access(world, tile_of(new_position), access) {
            return false;
        }

        if !neighbor_open {
            let ahead = (new_position - tile.as_vec2() * TILE_SIZE).dot(dir.as_vec2());
            if ahead > 0.0 {
                // Blocked ahead: stop at the tile center on the movement axis.
                let center = tile.as_vec2() * TILE_SIZE;
                if dir.is_horizontal() {
                    self.position.x = center.x;
                } else {
                    self.position.y = center.y;
                }
                return false;
            }
        }

        self.position = new_position;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_of() {
        assert_eq!(tile_of(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(tile_of(Vec2::new(3.9375, 0.0)), IVec2::new(0, 0));
        assert_eq!(tile_of(Vec2::new(4.0, 0.0)), IVec2::new(1, 0));
        assert_eq!(tile_of(Vec2::new(-4.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(tile_of(Vec2::new(-4.0625, 0.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_speeds_are_sixteenths() {
        for percent in (0..=200).step_by(5) {
            let pixels = pixels_per_tick(percent);
            assert_eq!((pixels * 16.0).fract(), 0.0, "{percent}%");
        }
    }

    #[test]
    fn test_door_access() {
        let world = World::arcade();
        let door = world.house().door[0];
        assert!(!can_access(&world, door, Access::empty()));
        assert!(can_access(&world, door, Access::DOOR));
        assert!(can_access(&world, IVec2::new(-1, 17), Access::empty()));
        assert!(!can_access(&world, IVec2::new(-2, 17), Access::empty()));
    }
}
