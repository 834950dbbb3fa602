//! The Hunting state: Pac-Man and the ghosts move, food is eaten and collisions resolve.

use tracing::{debug, info};

use crate::constants::{points, seconds, timing, BONUS_FOOD_THRESHOLDS, GLOBAL_DOT_LIMITS};
use crate::events::GameEvent;
use crate::game::level::{is_scatter_phase, private_dot_limit, starving_limit, LevelData};
use crate::game::state::GameState;
use crate::game::Game;
use crate::systems::bonus::BonusOutcome;
use crate::systems::ghost::{GhostContext, GhostId, GhostState};

impl Game {
    pub(super) fn update_hunting(&mut self) {
        let level = self.level();

        self.pac.update(&self.world, &level, &self.food, self.intents.direction());
        self.check_food(&level);
        self.update_bonus();
        self.release_ghosts();
        self.update_ghosts(&level);
        self.update_power();

        if self.food.is_exhausted() {
            self.change_state(GameState::ChangingLevel);
            return;
        }

        let pac_tile = self.pac.actor.tile();
        let prey = self
            .ghosts
            .iter()
            .position(|g| g.is(GhostState::Frightened) && g.actor.tile() == pac_tile);
        if let Some(index) = prey {
            self.kill_ghost(GhostId::from_index(index));
            self.change_state(GameState::GhostDying);
            return;
        }

        let caught = self
            .ghosts
            .iter()
            .any(|g| g.is(GhostState::HuntingPac) && g.actor.tile() == pac_tile);
        if caught && !self.pac.immune {
            self.change_state(GameState::PacmanDying);
            return;
        }

        // The hunting phase is paused while Pac-Man has power.
        if !self.pac.has_power() {
            self.timer_mut().tick();
        }
        if self.timer().expired() {
            self.start_hunting_phase(self.session.hunting_phase + 1);
            for ghost in &mut self.ghosts {
                if matches!(ghost.state, GhostState::HuntingPac | GhostState::Frightened) {
                    ghost.actor.request_reverse();
                }
            }
        }
    }

    fn check_food(&mut self, level: &LevelData) {
        let tile = self.pac.actor.tile();
        let index = match self.world.food_index(tile) {
            Some(index) if self.food.eat(index) => index,
            _ => {
                self.pac.starving_ticks += 1;
                return;
            }
        };

        self.pac.starving_ticks = 0;
        if self.world.is_energizer(index) {
            self.pac.rest_ticks = timing::REST_ENERGIZER;
            self.score(points::ENERGIZER);
            self.events.push(GameEvent::EnergizerEaten);
            self.give_power(level);
        } else {
            self.pac.rest_ticks = timing::REST_PELLET;
            self.score(points::PELLET);
            self.events.push(GameEvent::PelletEaten);
        }

        self.count_dot();
        self.update_elroy(level);

        if BONUS_FOOD_THRESHOLDS.contains(&self.food.eaten_count()) {
            self.bonus.activate(level.bonus_symbol, level.bonus_points, self.rng.as_mut());
            self.events.push(GameEvent::BonusActivated(level.bonus_symbol));
        }
    }

    fn give_power(&mut self, level: &LevelData) {
        self.session.ghosts_killed_in_power = 0;
        for ghost in &mut self.ghosts {
            if ghost.state != GhostState::Eaten {
                ghost.killed_index = None;
            }
        }

        if level.frightened_seconds == 0 {
            for ghost in &mut self.ghosts {
                if matches!(ghost.state, GhostState::HuntingPac | GhostState::Frightened) {
                    ghost.actor.request_reverse();
                }
            }
            return;
        }

        self.pac.start_power(seconds(level.frightened_seconds));
        self.ghosts[GhostId::Blinky.index()].suspend_elroy();
        for ghost in &mut self.ghosts {
            ghost.frighten();
        }
        debug!(ticks = seconds(level.frightened_seconds), "Pac-Man gained power");
    }

    /// Counts an eaten food item towards releasing the locked ghosts.
    fn count_dot(&mut self) {
        if self.session.global_dot_counter_enabled {
            let clyde_locked = self.ghosts[GhostId::Clyde.index()].is(GhostState::Locked);
            if clyde_locked && self.session.global_dot_counter == GLOBAL_DOT_LIMITS[GhostId::Clyde.index()] {
                self.session.global_dot_counter_enabled = false;
                debug!("Global dot counter disabled");
            } else {
                self.session.global_dot_counter += 1;
            }
        } else if let Some(id) = self.preferred_locked_ghost() {
            self.ghosts[id.index()].dot_counter += 1;
        }
    }

    fn update_elroy(&mut self, level: &LevelData) {
        let remaining = self.food.remaining();
        let blinky = &mut self.ghosts[GhostId::Blinky.index()];
        let new_level = if remaining == level.elroy1_dots_left {
            1
        } else if remaining == level.elroy2_dots_left {
            2
        } else {
            return;
        };
        // A suspended Elroy stays suspended at its new level.
        blinky.elroy = if blinky.elroy < 0 { -new_level } else { new_level };
        debug!(elroy = blinky.elroy, remaining, "Cruise Elroy level changed");
    }

    /// The first of Pinky, Inky and Clyde still locked in the house.
    fn preferred_locked_ghost(&self) -> Option<GhostId> {
        [GhostId::Pinky, GhostId::Inky, GhostId::Clyde]
            .into_iter()
            .find(|id| self.ghosts[id.index()].is(GhostState::Locked))
    }

    fn release_ghosts(&mut self) {
        if self.ghosts[GhostId::Blinky.index()].is(GhostState::Locked) {
            self.release_ghost(GhostId::Blinky, "always");
        }

        let Some(id) = self.preferred_locked_ghost() else {
            return;
        };
        if self.session.global_dot_counter_enabled {
            if self.session.global_dot_counter >= GLOBAL_DOT_LIMITS[id.index()] {
                self.release_ghost(id, "global dot counter");
                return;
            }
        } else if self.ghosts[id.index()].dot_counter >= private_dot_limit(id.index(), self.session.level) {
            self.release_ghost(id, "private dot counter");
            return;
        }

        if self.pac.starving_ticks >= starving_limit(self.session.level) {
            self.release_ghost(id, "starving");
            self.pac.starving_ticks = 0;
        }
    }

    fn release_ghost(&mut self, id: GhostId, reason: &str) {
        debug!(ghost = %id, reason, "Releasing ghost");
        self.ghosts[id.index()].set_state(GhostState::LeavingHouse);
        if id == GhostId::Clyde
            && self.session.global_dot_counter_enabled
            && self.session.global_dot_counter == GLOBAL_DOT_LIMITS[GhostId::Clyde.index()]
        {
            self.session.global_dot_counter_enabled = false;
            debug!("Global dot counter disabled");
        }
        if matches!(id, GhostId::Blinky | GhostId::Clyde) {
            self.resume_elroy();
        }
    }

    /// Resumes a suspended Cruise Elroy once Pac-Man is powerless and Clyde has left the house.
    fn resume_elroy(&mut self) {
        if self.pac.has_power() || self.ghosts[GhostId::Clyde.index()].is(GhostState::Locked) {
            return;
        }
        self.ghosts[GhostId::Blinky.index()].resume_elroy();
    }

    fn update_ghosts(&mut self, level: &LevelData) {
        let mut ctx = GhostContext {
            world: &self.world,
            level,
            pac_tile: self.pac.actor.tile(),
            pac_facing: self.pac.actor.move_dir,
            pac_has_power: self.pac.has_power(),
            blinky_tile: self.ghosts[GhostId::Blinky.index()].actor.tile(),
            scatter: is_scatter_phase(self.session.hunting_phase),
        };
        for ghost in &mut self.ghosts {
            ghost.update(&ctx, self.rng.as_mut());
            if ghost.id == GhostId::Blinky {
                ctx.blinky_tile = ghost.actor.tile();
            }
        }
    }

    fn update_power(&mut self) {
        if !self.pac.has_power() {
            return;
        }
        self.pac.power_timer.tick();
        if !self.pac.power_timer.expired() {
            return;
        }

        for ghost in &mut self.ghosts {
            if ghost.is(GhostState::Frightened) {
                ghost.set_state(GhostState::HuntingPac);
            }
        }
        if self.ghosts[GhostId::Blinky.index()].is(GhostState::HuntingPac) {
            self.resume_elroy();
        }
        debug!("Pac-Man lost power");
    }

    fn update_bonus(&mut self) {
        if self.bonus.is_edible() && self.pac.actor.tile() == self.bonus.tile() {
            let points = self.bonus.eat();
            self.score(points);
            self.events.push(GameEvent::BonusEaten {
                symbol: self.bonus.symbol,
                points,
            });
            debug!(symbol = %self.bonus.symbol, points, "Bonus eaten");
            return;
        }
        if self.bonus.update() == Some(BonusOutcome::Expired) {
            self.events.push(GameEvent::BonusExpired);
        }
    }

    /// Eats `id` as the next ghost of the bounty ladder.
    fn kill_ghost(&mut self, id: GhostId) {
        let index = self.session.ghosts_killed_in_power;
        let ghost = &mut self.ghosts[id.index()];
        ghost.kill(index);
        let points = points::FIRST_GHOST << index;
        if id == GhostId::Blinky {
            ghost.suspend_elroy();
        }

        self.session.ghosts_killed_in_power += 1;
        self.session.ghosts_killed_in_level += 1;
        self.score(points);
        self.events.push(GameEvent::GhostEaten { ghost: id, points });
        debug!(ghost = %id, points, "Ghost eaten");

        if self.session.ghosts_killed_in_level == points::ALL_GHOSTS_KILLED {
            self.score(points::ALL_GHOSTS_BONUS);
            info!(level = self.session.level, "All ghosts eaten this level");
        }
    }

    /// Eats every ghost that is hunting or frightened.
    pub(super) fn kill_all_ghosts(&mut self) {
        self.session.ghosts_killed_in_power = 0;
        let prey: Vec<GhostId> = self
            .ghosts
            .iter()
            .filter(|g| matches!(g.state, GhostState::HuntingPac | GhostState::Frightened))
            .map(|g| g.id)
            .collect();
        if prey.is_empty() {
            return;
        }
        for id in prey {
            self.kill_ghost(id);
        }
        self.change_state(GameState::GhostDying);
    }

    /// Eats all remaining food without scoring it, ending the level on this tick.
    pub(super) fn eat_all_food(&mut self) {
        for index in 0..self.world.food_count() {
            self.food.eat(index);
        }
        info!(level = self.session.level, "Level skipped");
    }

    pub(super) fn score(&mut self, points: u32) {
        if self.session.add_points(points) {
            self.events.push(GameEvent::ExtraLife);
        }
    }
}
