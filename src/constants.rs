//! This module contains all the constants used by the simulation.

use std::time::Duration;

use glam::IVec2;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 8.0;
/// Half the size of a tile, in pixels.
pub const HALF_TILE: f32 = 4.0;

/// The size of the world, in tiles.
pub const WORLD_SIZE: IVec2 = IVec2::new(28, 36);

/// Pixels travelled per tick at 100% speed.
pub const BASE_SPEED: f32 = 1.25;

/// Converts a duration in seconds to ticks.
pub const fn seconds(secs: u32) -> u32 {
    secs * TICKS_PER_SECOND
}

/// Arcade constants describing the ghost house and special tiles.
pub mod house {
    use glam::IVec2;

    /// Top-left tile of the house walls.
    pub const TOP_LEFT: IVec2 = IVec2::new(10, 15);
    /// Size of the house including its walls, in tiles.
    pub const SIZE: IVec2 = IVec2::new(8, 5);
    /// The (left) tile directly above the door; ghosts leave and re-enter here.
    pub const ENTRY_TILE: IVec2 = IVec2::new(13, 14);
    /// Seat tiles inside the house. Actors sit half a tile to the right of these.
    pub const SEAT_LEFT: IVec2 = IVec2::new(11, 17);
    pub const SEAT_CENTER: IVec2 = IVec2::new(13, 17);
    pub const SEAT_RIGHT: IVec2 = IVec2::new(15, 17);
}

/// Tiles where hunting ghosts may not choose to go up.
pub const UPWARD_BLOCKED_TILES: [IVec2; 4] = [
    IVec2::new(12, 14),
    IVec2::new(15, 14),
    IVec2::new(12, 26),
    IVec2::new(15, 26),
];

/// Tile the bonus symbol appears on (shifted half a tile to the right).
pub const BONUS_TILE: IVec2 = IVec2::new(13, 20);

/// Speeds are percentages of [`BASE_SPEED`].
pub mod speed {
    /// Speed of ghosts moving inside the house.
    pub const INSIDE_HOUSE: u16 = 50;
}

/// Durations of the top-level states, in ticks.
pub mod timing {
    use super::seconds;

    /// Ready duration at the start of a new game.
    pub const READY_NEW_GAME: u32 = 270;
    /// Actors become visible once this many ticks of a new game's Ready remain.
    pub const READY_REVEAL: u32 = 120;
    /// Ready duration after a lost life or a completed level.
    pub const READY: u32 = 120;

    pub const GHOST_DYING: u32 = seconds(1);
    /// How long an eaten ghost displays its bounty.
    pub const GHOST_BOUNTY: u32 = seconds(1);

    pub const PACMAN_DYING: u32 = seconds(4);
    pub const PACMAN_DYING_HIDE_GHOSTS: u32 = 60;
    pub const PACMAN_DYING_ANIMATION: u32 = 84;
    pub const PACMAN_DYING_LOSE_LIFE: u32 = 180;

    pub const LEVEL_COMPLETE_PAUSE: u32 = seconds(1);
    /// Ticks per maze flash (half bright, half dark).
    pub const MAZE_FLASH: u32 = 24;

    pub const GAME_OVER: u32 = seconds(3);

    /// Ticks a frightened ghost spends per flash at the end of Pac-Man's power.
    pub const GHOST_FLASH: u32 = 28;

    /// Pac-Man rests this many ticks after eating a pellet.
    pub const REST_PELLET: u32 = 1;
    /// Pac-Man rests this many ticks after eating an energizer.
    pub const REST_ENERGIZER: u32 = 3;

    /// Minimum and maximum (exclusive) lifetime of an edible bonus.
    pub const BONUS_MIN: u32 = 540;
    pub const BONUS_MAX: u32 = 600;
    /// How long an eaten bonus shows its value.
    pub const BONUS_EATEN: u32 = seconds(2);
}

/// Point values.
pub mod points {
    pub const PELLET: u32 = 10;
    pub const ENERGIZER: u32 = 50;
    /// Value of the first ghost eaten in a power phase; doubles for each following one.
    pub const FIRST_GHOST: u32 = 200;
    /// Awarded once per level when the last of [`ALL_GHOSTS_KILLED`] ghosts is eaten.
    pub const ALL_GHOSTS_BONUS: u32 = 12_000;
    pub const ALL_GHOSTS_KILLED: u32 = 16;
    /// Score at which the single extra life is awarded.
    pub const EXTRA_LIFE: u32 = 10_000;
}

/// Food eaten counts at which the bonus symbol appears.
pub const BONUS_FOOD_THRESHOLDS: [usize; 2] = [70, 170];

/// Global dot counter thresholds at which Pinky, Inky and Clyde leave the house.
pub const GLOBAL_DOT_LIMITS: [u32; 4] = [0, 7, 17, 32];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(0), 0);
        assert_eq!(seconds(6), 360);
    }

    #[test]
    fn test_house_fits_world() {
        let bottom_right = house::TOP_LEFT + house::SIZE;
        assert!(bottom_right.x <= WORLD_SIZE.x);
        assert!(bottom_right.y <= WORLD_SIZE.y);
        assert_eq!(house::ENTRY_TILE.y, house::TOP_LEFT.y - 1);
    }

    #[test]
    fn test_ghost_bounty_ladder() {
        let ladder: Vec<u32> = (0..4).map(|i| points::FIRST_GHOST << i).collect();
        assert_eq!(ladder, vec![200, 400, 800, 1600]);
    }

    #[test]
    fn test_bonus_window() {
        assert!(timing::BONUS_MIN < timing::BONUS_MAX);
        assert_eq!(timing::BONUS_MIN, seconds(9));
        assert_eq!(timing::BONUS_MAX, seconds(10));
    }
}
