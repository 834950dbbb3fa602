//! The bonus symbol that appears below the ghost house twice per level.

use glam::{IVec2, Vec2};
use rand::{Rng, RngCore};
use strum_macros::{AsRefStr, Display};
use tracing::debug;

use crate::constants::{timing, BONUS_TILE, HALF_TILE, TILE_SIZE};
use crate::systems::timer::{TickTimer, TimerDuration};

/// The symbols that can be awarded as a bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum BonusSymbol {
    Cherries,
    Strawberry,
    Peach,
    Apple,
    Grapes,
    Galaxian,
    Bell,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BonusState {
    #[default]
    Inactive,
    Edible,
    /// Eaten and showing its value.
    Eaten,
}

/// What happened to the bonus during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusOutcome {
    /// The bonus vanished without being eaten.
    Expired,
    /// The value display of an eaten bonus ended.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    pub symbol: BonusSymbol,
    pub points: u32,
    pub state: BonusState,
    timer: TickTimer,
}

impl Default for Bonus {
    fn default() -> Self {
        Self {
            symbol: BonusSymbol::Cherries,
            points: 0,
            state: BonusState::Inactive,
            timer: TickTimer::default(),
        }
    }
}

impl Bonus {
    /// Makes the bonus edible for a random 9 to 10 second window.
    pub fn activate(&mut self, symbol: BonusSymbol, points: u32, rng: &mut dyn RngCore) {
        let ticks = rng.random_range(timing::BONUS_MIN..timing::BONUS_MAX);
        self.symbol = symbol;
        self.points = points;
        self.state = BonusState::Edible;
        self.timer.start(TimerDuration::Ticks(ticks));
        debug!(symbol = %symbol, ticks, "Bonus activated");
    }

    /// Eats the bonus and returns its value.
    pub fn eat(&mut self) -> u32 {
        self.state = BonusState::Eaten;
        self.timer.start(TimerDuration::Ticks(timing::BONUS_EATEN));
        self.points
    }

    pub fn update(&mut self) -> Option<BonusOutcome> {
        if self.state == BonusState::Inactive {
            return None;
        }
        self.timer.tick();
        if !self.timer.expired() {
            return None;
        }
        let outcome = match self.state {
            BonusState::Edible => BonusOutcome::Expired,
            _ => BonusOutcome::Cleared,
        };
        self.state = BonusState::Inactive;
        Some(outcome)
    }

    pub fn is_edible(&self) -> bool {
        self.state == BonusState::Edible
    }

    pub fn remaining(&self) -> u32 {
        self.timer.remaining().unwrap_or(0)
    }

    pub fn tile(&self) -> IVec2 {
        BONUS_TILE
    }

    /// The bonus sits half a tile to the right of its tile.
    pub fn position(&self) -> Vec2 {
        BONUS_TILE.as_vec2() * TILE_SIZE + Vec2::new(HALF_TILE, 0.0)
    }

    pub fn reset(&mut self) {
        self.state = BonusState::Inactive;
        self.timer = TickTimer::default();
    }
}
