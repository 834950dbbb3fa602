//! Map parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;

use crate::constants::WORLD_SIZE;
use crate::error::ParseError;

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapTile {
    /// An empty, walkable tile.
    #[default]
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    Energizer,
    /// One half of the ghost house door.
    Door,
    /// A tunnel tile, where ghosts are slowed down.
    Tunnel,
}

impl MapTile {
    pub fn is_food(self) -> bool {
        matches!(self, MapTile::Pellet | MapTile::Energizer)
    }
}

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// The parsed tile layout, row-major.
    pub tiles: Vec<MapTile>,
    /// The positions of the house door tiles.
    pub house_door: [IVec2; 2],
    /// Rows whose first and last tiles are tunnel tiles.
    pub portal_rows: Vec<i32>,
    /// Pac-Man's starting tile.
    pub pacman_start: IVec2,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::Energizer),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            'X' => Ok(MapTile::Empty), // Pac-Man's starting position, treated as empty
            '=' => Ok(MapTile::Door),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has the wrong dimensions, contains unknown characters,
    /// lacks Pac-Man's starting tile, has a tunnel row that does not reach both edges, or
    /// if the house door is not defined by exactly two '=' characters.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = WORLD_SIZE.x as usize;
        let height = WORLD_SIZE.y as usize;
        if raw_board.len() != height {
            return Err(ParseError::InvalidRowCount(raw_board.len()));
        }

        let mut tiles = vec![MapTile::Empty; width * height];
        let mut house_door = Vec::with_capacity(2);
        let mut pacman_start: Option<IVec2> = None;

        for (y, line) in raw_board.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(ParseError::InvalidDimensions {
                    expected_width: width,
                    expected_height: height,
                    row: y,
                    width: row_width,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                if tile == MapTile::Door {
                    house_door.push(position);
                }
                if character == 'X' {
                    pacman_start = Some(position);
                }

                tiles[y * width + x] = tile;
            }
        }

        if house_door.len() != 2 {
            return Err(ParseError::InvalidHouseDoorCount(house_door.len()));
        }

        let mut portal_rows = Vec::new();
        for y in 0..height {
            let left = tiles[y * width] == MapTile::Tunnel;
            let right = tiles[y * width + width - 1] == MapTile::Tunnel;
            match (left, right) {
                (true, true) => portal_rows.push(y as i32),
                (false, false) => {}
                _ => return Err(ParseError::UnpairedPortal(y as i32)),
            }
        }

        Ok(ParsedMap {
            tiles,
            house_door: [house_door[0], house_door[1]],
            portal_rows,
            pacman_start: pacman_start.ok_or(ParseError::MissingPacStart)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::layout::ARCADE_MAP;

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('#'), Ok(MapTile::Wall));
        assert_eq!(MapTileParser::parse_character('.'), Ok(MapTile::Pellet));
        assert_eq!(MapTileParser::parse_character('o'), Ok(MapTile::Energizer));
        assert_eq!(MapTileParser::parse_character(' '), Ok(MapTile::Empty));
        assert_eq!(MapTileParser::parse_character('T'), Ok(MapTile::Tunnel));
        assert_eq!(MapTileParser::parse_character('X'), Ok(MapTile::Empty));
        assert_eq!(MapTileParser::parse_character('='), Ok(MapTile::Door));
        assert_eq!(MapTileParser::parse_character('Z'), Err(ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_arcade_board() {
        let parsed = MapTileParser::parse_board(&ARCADE_MAP).unwrap();

        assert_eq!(parsed.tiles.len(), 28 * 36);
        assert_eq!(parsed.house_door, [IVec2::new(13, 15), IVec2::new(14, 15)]);
        assert_eq!(parsed.portal_rows, vec![17]);
        assert_eq!(parsed.pacman_start, IVec2::new(13, 26));
    }

    #[test]
    fn test_parse_board_counts_food() {
        let parsed = MapTileParser::parse_board(&ARCADE_MAP).unwrap();
        let pellets = parsed.tiles.iter().filter(|t| **t == MapTile::Pellet).count();
        let energizers = parsed.tiles.iter().filter(|t| **t == MapTile::Energizer).count();
        assert_eq!(pellets, 240);
        assert_eq!(energizers, 4);
    }
}
