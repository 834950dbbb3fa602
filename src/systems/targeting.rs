//! Ghost target tiles and the greedy direction choice toward them.
//!
//! The chase targets reproduce the arcade's arithmetic exactly, including the overflow
//! that shifts Pinky's and Inky's look-ahead to the left whenever Pac-Man faces up.

use glam::IVec2;

use crate::map::direction::Direction;
use crate::map::world::World;
use crate::systems::ghost::GhostId;
use crate::systems::movement::{can_access, Access, Actor};

/// The tile `steps` tiles ahead of `tile` in direction `facing`.
///
/// Facing up also moves the result `steps` tiles to the left.
pub fn tiles_ahead(tile: IVec2, facing: Direction, steps: i32) -> IVec2 {
    let ahead = tile + facing.as_ivec2() * steps;
    if facing == Direction::Up {
        ahead + Direction::Left.as_ivec2() * steps
    } else {
        ahead
    }
}

/// Where a ghost heads while chasing.
///
/// `ghost_tile` is the deciding ghost's own tile and `blinky_tile` is Blinky's, which
/// Inky uses as the pivot of his reflection.
pub fn chase_target(id: GhostId, pac_tile: IVec2, pac_facing: Direction, blinky_tile: IVec2, ghost_tile: IVec2) -> IVec2 {
    match id {
        GhostId::Blinky => pac_tile,
        GhostId::Pinky => tiles_ahead(pac_tile, pac_facing, 4),
        GhostId::Inky => tiles_ahead(pac_tile, pac_facing, 2) * 2 - blinky_tile,
        GhostId::Clyde => {
            if (ghost_tile - pac_tile).length_squared() >= 8 * 8 {
                pac_tile
            } else {
                id.scatter_tile()
            }
        }
    }
}

/// Picks the neighbor closest to `target`.
///
/// Never reverses and never decides on a portal tile. Hunting ghosts additionally may not
/// turn up on the upward-blocked tiles. Ties go to the first direction in
/// [`Direction::PRIORITY`]. Returns `None` when no direction qualifies.
pub fn direction_towards(world: &World, actor: &Actor, target: IVec2, access: Access, hunting: bool) -> Option<Direction> {
    let tile = actor.tile();
    if world.is_portal(tile) {
        return None;
    }

    let reverse = actor.move_dir.opposite();
    let mut best: Option<(Direction, i32)> = None;
    for dir in Direction::PRIORITY {
        if dir == reverse {
            continue;
        }
        if hunting && dir == Direction::Up && world.is_upward_blocked(tile) {
            continue;
        }
        let neighbor = tile + dir.as_ivec2();
        if !can_access(world, neighbor, access) {
            continue;
        }
        let distance = (neighbor - target).length_squared();
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((dir, distance));
        }
    }
    best.map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_ahead_overflow() {
        let pac = IVec2::new(13, 26);
        assert_eq!(tiles_ahead(pac, Direction::Up, 4), IVec2::new(9, 22));
        assert_eq!(tiles_ahead(pac, Direction::Down, 4), IVec2::new(13, 30));
        assert_eq!(tiles_ahead(pac, Direction::Left, 2), IVec2::new(11, 26));
    }
}
