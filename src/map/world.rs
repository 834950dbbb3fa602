//! The static classification of the maze: walls, food, tunnels, portals and the ghost house.

use glam::IVec2;
use tracing::debug;

use crate::constants::{house, UPWARD_BLOCKED_TILES, WORLD_SIZE};
use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::layout::ARCADE_MAP;
use crate::map::parser::{MapTile, MapTileParser};

/// A pair of virtual tiles just outside the left and right edges of a tunnel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    pub left: IVec2,
    pub right: IVec2,
}

/// The ghost house: its walls, its door and the seats ghosts rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct House {
    pub top_left: IVec2,
    pub size: IVec2,
    pub door: [IVec2; 2],
    /// The tile above the door where ghosts leave and re-enter.
    pub entry_tile: IVec2,
    /// Left, center and right seat tiles.
    pub seats: [IVec2; 3],
}

impl House {
    /// Whether `tile` lies within the house walls (the door row included).
    pub fn contains(&self, tile: IVec2) -> bool {
        let bottom_right = self.top_left + self.size;
        tile.x >= self.top_left.x && tile.x < bottom_right.x && tile.y >= self.top_left.y && tile.y < bottom_right.y
    }

    pub fn is_door(&self, tile: IVec2) -> bool {
        self.door.contains(&tile)
    }
}

/// The immutable maze a level is played in.
#[derive(Debug, Clone)]
pub struct World {
    tiles: Vec<MapTile>,
    portals: Vec<Portal>,
    house: House,
    pacman_start: IVec2,
    food_tiles: Vec<IVec2>,
    food_lookup: Vec<Option<usize>>,
    energizers: Vec<usize>,
}

impl World {
    /// Builds a world from a raw board layout.
    pub fn new(raw_board: &[&str]) -> Result<World, ParseError> {
        let parsed = MapTileParser::parse_board(raw_board)?;

        let mut food_tiles = Vec::new();
        let mut food_lookup = vec![None; parsed.tiles.len()];
        let mut energizers = Vec::new();
        for (i, tile) in parsed.tiles.iter().enumerate() {
            if tile.is_food() {
                if *tile == MapTile::Energizer {
                    energizers.push(food_tiles.len());
                }
                food_lookup[i] = Some(food_tiles.len());
                food_tiles.push(IVec2::new(i as i32 % WORLD_SIZE.x, i as i32 / WORLD_SIZE.x));
            }
        }

        let portals = parsed
            .portal_rows
            .iter()
            .map(|&y| Portal {
                left: IVec2::new(-1, y),
                right: IVec2::new(WORLD_SIZE.x, y),
            })
            .collect::<Vec<_>>();

        let house = House {
            top_left: house::TOP_LEFT,
            size: house::SIZE,
            door: parsed.house_door,
            entry_tile: house::ENTRY_TILE,
            seats: [house::SEAT_LEFT, house::SEAT_CENTER, house::SEAT_RIGHT],
        };

        debug!(
            food = food_tiles.len(),
            energizers = energizers.len(),
            portals = portals.len(),
            "World built"
        );

        Ok(World {
            tiles: parsed.tiles,
            portals,
            house,
            pacman_start: parsed.pacman_start,
            food_tiles,
            food_lookup,
            energizers,
        })
    }

    /// The arcade maze.
    ///
    /// # Panics
    ///
    /// Panics if the built-in layout is malformed, which is a programming error.
    pub fn arcade() -> World {
        World::new(&ARCADE_MAP).unwrap_or_else(|e| panic!("built-in arcade map is invalid: {e}"))
    }

    /// Whether `tile` is on the board proper.
    pub fn inside(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.x < WORLD_SIZE.x && tile.y >= 0 && tile.y < WORLD_SIZE.y
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        self.inside(tile)
            .then(|| (tile.y * WORLD_SIZE.x + tile.x) as usize)
    }

    /// The original classification of `tile`. Portal tiles read as tunnels, anything else
    /// off the board as walls.
    pub fn tile(&self, tile: IVec2) -> MapTile {
        match self.index(tile) {
            Some(i) => self.tiles[i],
            None if self.is_portal(tile) => MapTile::Tunnel,
            None => MapTile::Wall,
        }
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.tile(tile) == MapTile::Wall
    }

    pub fn is_door(&self, tile: IVec2) -> bool {
        self.house.is_door(tile)
    }

    /// Tunnel tiles, including the virtual portal tiles beyond the edges.
    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.tile(tile) == MapTile::Tunnel
    }

    pub fn is_portal(&self, tile: IVec2) -> bool {
        self.portals.iter().any(|p| p.left == tile || p.right == tile)
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn is_upward_blocked(&self, tile: IVec2) -> bool {
        UPWARD_BLOCKED_TILES.contains(&tile)
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn pacman_start(&self) -> IVec2 {
        self.pacman_start
    }

    /// A tile where at least three neighbors can be walked on, outside of the house
    /// and not directly above its door.
    pub fn is_intersection(&self, tile: IVec2) -> bool {
        if self.house.contains(tile) || self.is_door(tile + Direction::Down.as_ivec2()) {
            return false;
        }
        Direction::DIRECTIONS
            .iter()
            .filter(|dir| {
                let neighbor = tile + dir.as_ivec2();
                !self.is_wall(neighbor) && !self.is_door(neighbor)
            })
            .count()
            >= 3
    }

    /// The food index of `tile`, if it originally held food.
    pub fn food_index(&self, tile: IVec2) -> Option<usize> {
        self.index(tile).and_then(|i| self.food_lookup[i])
    }

    /// The tile of the food with index `index`.
    pub fn food_tile(&self, index: usize) -> IVec2 {
        self.food_tiles[index]
    }

    pub fn food_count(&self) -> usize {
        self.food_tiles.len()
    }

    pub fn is_energizer(&self, index: usize) -> bool {
        self.energizers.contains(&index)
    }

    /// Food indices of all energizers.
    pub fn energizers(&self) -> &[usize] {
        &self.energizers
    }
}

impl Default for World {
    fn default() -> Self {
        World::arcade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_tiles_are_walls() {
        let world = World::arcade();
        assert_eq!(world.tile(IVec2::new(-1, 0)), MapTile::Wall);
        assert_eq!(world.tile(IVec2::new(40, 40)), MapTile::Wall);
        assert_eq!(world.tile(IVec2::new(-1, 17)), MapTile::Tunnel);
        assert_eq!(world.tile(IVec2::new(28, 17)), MapTile::Tunnel);
    }

    #[test]
    fn test_food_lookup_roundtrip() {
        let world = World::arcade();
        for index in 0..world.food_count() {
            assert_eq!(world.food_index(world.food_tile(index)), Some(index));
        }
    }
}
