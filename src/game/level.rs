//! Per-level arcade data: speeds, Cruise Elroy thresholds, fright times and hunting phases.

use crate::systems::bonus::BonusSymbol;
use crate::systems::timer::TimerDuration;

/// One row of the arcade level table. Speeds are percentages of the base speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelData {
    pub bonus_symbol: BonusSymbol,
    pub bonus_points: u32,
    pub pac_speed: u16,
    pub ghost_speed: u16,
    pub ghost_tunnel_speed: u16,
    pub elroy1_dots_left: usize,
    pub elroy1_speed: u16,
    pub elroy2_dots_left: usize,
    pub elroy2_speed: u16,
    pub pac_powered_speed: u16,
    pub ghost_frightened_speed: u16,
    pub frightened_seconds: u32,
    pub num_flashes: u32,
}

macro_rules! level {
    ($symbol:ident, $points:expr, $pac:expr, $ghost:expr, $tunnel:expr, $e1dots:expr, $e1spd:expr, $e2dots:expr, $e2spd:expr, $powered:expr, $fright:expr, $secs:expr, $flashes:expr) => {
        LevelData {
            bonus_symbol: BonusSymbol::$symbol,
            bonus_points: $points,
            pac_speed: $pac,
            ghost_speed: $ghost,
            ghost_tunnel_speed: $tunnel,
            elroy1_dots_left: $e1dots,
            elroy1_speed: $e1spd,
            elroy2_dots_left: $e2dots,
            elroy2_speed: $e2spd,
            pac_powered_speed: $powered,
            ghost_frightened_speed: $fright,
            frightened_seconds: $secs,
            num_flashes: $flashes,
        }
    };
}

#[rustfmt::skip]
const LEVELS: [LevelData; 21] = [
    /*  1 */ level!(Cherries,    100,  80, 75, 40,  20,  80, 10,  85,  90, 50, 6, 5),
    /*  2 */ level!(Strawberry,  300,  90, 85, 45,  30,  90, 15,  95,  95, 55, 5, 5),
    /*  3 */ level!(Peach,       500,  90, 85, 45,  40,  90, 20,  95,  95, 55, 4, 5),
    /*  4 */ level!(Peach,       500,  90, 85, 45,  40,  90, 20,  95,  95, 55, 3, 5),
    /*  5 */ level!(Apple,       700, 100, 95, 50,  40, 100, 20, 105, 100, 60, 2, 5),
    /*  6 */ level!(Apple,       700, 100, 95, 50,  50, 100, 25, 105, 100, 60, 5, 5),
    /*  7 */ level!(Grapes,     1000, 100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    /*  8 */ level!(Grapes,     1000, 100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    /*  9 */ level!(Galaxian,   2000, 100, 95, 50,  60, 100, 30, 105, 100, 60, 1, 3),
    /* 10 */ level!(Galaxian,   2000, 100, 95, 50,  60, 100, 30, 105, 100, 60, 5, 5),
    /* 11 */ level!(Bell,       3000, 100, 95, 50,  60, 100, 30, 105, 100, 60, 2, 5),
    /* 12 */ level!(Bell,       3000, 100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    /* 13 */ level!(Key,        5000, 100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    /* 14 */ level!(Key,        5000, 100, 95, 50,  80, 100, 40, 105, 100, 60, 3, 5),
    /* 15 */ level!(Key,        5000, 100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    /* 16 */ level!(Key,        5000, 100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    /* 17 */ level!(Key,        5000, 100, 95, 50, 100, 100, 50, 105,   0,  0, 0, 0),
    /* 18 */ level!(Key,        5000, 100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    /* 19 */ level!(Key,        5000, 100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    /* 20 */ level!(Key,        5000, 100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    /* 21 */ level!(Key,        5000,  90, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
];

/// Returns the data for `level`. Levels past the end of the table reuse its last row.
///
/// # Panics
///
/// Panics if `level` is 0; levels are numbered from 1.
pub fn level_data(level: u32) -> &'static LevelData {
    assert!(level >= 1, "level numbers start at 1, got {level}");
    let index = (level as usize).min(LEVELS.len()) - 1;
    &LEVELS[index]
}

const PHASES_LEVEL_1: [u32; 7] = [420, 1200, 420, 1200, 300, 1200, 300];
const PHASES_LEVEL_2_TO_4: [u32; 7] = [420, 1200, 420, 1200, 300, 1033 * 60, 1];
const PHASES_LEVEL_5_PLUS: [u32; 7] = [300, 1200, 300, 1200, 300, 1037 * 60, 1];

/// Duration of hunting phase `phase` on `level`. Even phases scatter, odd phases chase,
/// and the eighth phase chases forever.
pub fn hunting_phase_duration(level: u32, phase: usize) -> TimerDuration {
    let table = match level {
        0 => panic!("level numbers start at 1"),
        1 => &PHASES_LEVEL_1,
        2..=4 => &PHASES_LEVEL_2_TO_4,
        _ => &PHASES_LEVEL_5_PLUS,
    };
    table
        .get(phase)
        .map_or(TimerDuration::Indefinite, |&ticks| TimerDuration::Ticks(ticks))
}

pub fn is_scatter_phase(phase: usize) -> bool {
    phase % 2 == 0
}

/// Private dot limit of the ghost with the given index on `level`.
pub fn private_dot_limit(ghost_index: usize, level: u32) -> u32 {
    match (ghost_index, level) {
        (2, 1) => 30,
        (3, 1) => 60,
        (3, 2) => 50,
        _ => 0,
    }
}

/// Ticks without eating after which the next locked ghost is forced out of the house.
pub fn starving_limit(level: u32) -> u32 {
    if level < 5 {
        240
    } else {
        180
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_past_table_reuse_last_row() {
        assert_eq!(level_data(21), level_data(22));
        assert_eq!(level_data(255), level_data(21));
        assert_eq!(level_data(1).bonus_points, 100);
    }

    #[test]
    #[should_panic]
    fn test_level_zero_panics() {
        level_data(0);
    }

    #[test]
    fn test_hunting_phases() {
        assert_eq!(hunting_phase_duration(1, 0), TimerDuration::Ticks(420));
        assert_eq!(hunting_phase_duration(3, 5), TimerDuration::Ticks(61980));
        assert_eq!(hunting_phase_duration(5, 0), TimerDuration::Ticks(300));
        assert_eq!(hunting_phase_duration(9, 7), TimerDuration::Indefinite);
        assert!(is_scatter_phase(0));
        assert!(!is_scatter_phase(7));
    }

    #[test]
    fn test_private_dot_limits() {
        assert_eq!(private_dot_limit(1, 1), 0);
        assert_eq!(private_dot_limit(2, 1), 30);
        assert_eq!(private_dot_limit(3, 1), 60);
        assert_eq!(private_dot_limit(3, 2), 50);
        assert_eq!(private_dot_limit(3, 3), 0);
    }
}
