//! The top-level game state machine.
//!
//! Every state has an enter, update and exit step and its own [`TickTimer`]. Handlers
//! check their timer at the start of an update and tick it at the end, so forcing a timer
//! to expire behaves exactly like running it out.

use strum_macros::{AsRefStr, Display, EnumCount};
use tracing::{debug, info};

use crate::constants::timing;
use crate::events::{GameEvent, Intents};
use crate::game::level::level_data;
use crate::game::Game;
use crate::systems::ghost::{GhostContext, GhostId, GhostState};
use crate::systems::timer::TimerDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumCount, AsRefStr, Display)]
pub enum GameState {
    #[default]
    Boot,
    /// Attract mode, waiting for a credit.
    Intro,
    Ready,
    Hunting,
    /// Short freeze after Pac-Man eats a ghost.
    GhostDying,
    PacmanDying,
    ChangingLevel,
    GameOver,
}

impl GameState {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Game {
    /// Leaves the current state and enters `new_state`.
    pub(crate) fn change_state(&mut self, new_state: GameState) {
        let old_state = self.state;
        self.on_exit(old_state);
        self.state = new_state;
        debug!(old_state = ?old_state, new_state = ?new_state, "Game state transition");
        self.events.push(GameEvent::StateChanged {
            from: old_state,
            to: new_state,
        });
        self.on_enter(new_state);
    }

    /// Returns to an interrupted state without running its enter step, keeping its timer.
    fn resume_state(&mut self, state: GameState) {
        let old_state = self.state;
        self.on_exit(old_state);
        self.state = state;
        debug!(old_state = ?old_state, new_state = ?state, "Game state resumed");
        self.events.push(GameEvent::StateChanged {
            from: old_state,
            to: state,
        });
    }

    fn start_timer(&mut self, state: GameState, duration: TimerDuration) {
        self.timers[state.index()].start(duration);
    }

    fn on_enter(&mut self, state: GameState) {
        match state {
            GameState::Boot => {}
            GameState::Intro => {
                self.start_timer(state, TimerDuration::Indefinite);
                self.set_actors_visible(false);
            }
            GameState::Ready => {
                let ticks = if self.new_game_ready {
                    timing::READY_NEW_GAME
                } else {
                    timing::READY
                };
                self.start_timer(state, TimerDuration::Ticks(ticks));
                self.reset_actors();
                self.set_actors_visible(!self.new_game_ready);
            }
            GameState::Hunting => {
                self.set_actors_visible(true);
                self.start_hunting_phase(0);
            }
            GameState::GhostDying => {
                self.start_timer(state, TimerDuration::Ticks(timing::GHOST_DYING));
                self.pac.actor.visible = false;
            }
            GameState::PacmanDying => {
                self.start_timer(state, TimerDuration::Ticks(timing::PACMAN_DYING));
                self.pac.dead = true;
                self.pac.power_timer.expire();
                self.pac_dying_animation = false;
                self.ghosts[GhostId::Blinky.index()].suspend_elroy();
                self.bonus.reset();
                self.session.reset_global_dot_counter();
                self.events.push(GameEvent::PacmanKilled);
                info!(level = self.session.level, lives = self.session.lives, "Pac-Man killed");
            }
            GameState::ChangingLevel => {
                let flashes = level_data(self.session.level).num_flashes;
                let ticks = 2 * timing::LEVEL_COMPLETE_PAUSE + flashes * timing::MAZE_FLASH;
                self.start_timer(state, TimerDuration::Ticks(ticks));
                for ghost in &mut self.ghosts {
                    ghost.actor.visible = false;
                }
                self.bonus.reset();
                self.events.push(GameEvent::LevelComplete {
                    level: self.session.level,
                });
                info!(level = self.session.level, score = self.session.score, "Level complete");
                self.persist_high_score();
            }
            GameState::GameOver => {
                self.start_timer(state, TimerDuration::Ticks(timing::GAME_OVER));
                self.set_actors_visible(false);
                self.events.push(GameEvent::GameOver);
                info!(score = self.session.score, level = self.session.level, "Game over");
                self.persist_high_score();
            }
        }
    }

    fn on_exit(&mut self, state: GameState) {
        match state {
            GameState::Ready => self.new_game_ready = false,
            GameState::GhostDying => {
                self.pac.actor.visible = true;
                for ghost in &mut self.ghosts {
                    ghost.finish_bounty();
                }
            }
            GameState::ChangingLevel => self.maze_flashing = false,
            GameState::PacmanDying => self.pac_dying_animation = false,
            _ => {}
        }
    }

    /// Runs the current state's update step.
    pub(crate) fn update_state(&mut self) {
        match self.state {
            GameState::Boot => self.update_boot(),
            GameState::Intro => self.update_intro(),
            GameState::Ready => self.update_ready(),
            GameState::Hunting => self.update_hunting(),
            GameState::GhostDying => self.update_ghost_dying(),
            GameState::PacmanDying => self.update_pacman_dying(),
            GameState::ChangingLevel => self.update_changing_level(),
            GameState::GameOver => self.update_game_over(),
        }
    }

    fn update_boot(&mut self) {
        self.load_high_score();
        self.change_state(GameState::Intro);
    }

    fn update_intro(&mut self) {
        if self.intents.contains(Intents::START) || self.timer().expired() {
            self.start_game();
            self.change_state(GameState::Ready);
            return;
        }
        self.timer_mut().tick();
    }

    fn update_ready(&mut self) {
        if self.timer().expired() {
            self.change_state(GameState::Hunting);
            return;
        }
        self.timer_mut().tick();
        if self.new_game_ready && self.timer().remaining() == Some(timing::READY_REVEAL) {
            self.set_actors_visible(true);
        }
    }

    fn update_ghost_dying(&mut self) {
        if self.timer().expired() {
            self.resume_state(GameState::Hunting);
            return;
        }

        let level = *level_data(self.session.level);
        let ctx = GhostContext {
            world: &self.world,
            level: &level,
            pac_tile: self.pac.actor.tile(),
            pac_facing: self.pac.actor.move_dir,
            pac_has_power: self.pac.has_power(),
            blinky_tile: self.ghosts[GhostId::Blinky.index()].actor.tile(),
            scatter: false,
        };
        for ghost in &mut self.ghosts {
            match ghost.state {
                GhostState::Eaten => ghost.update_bounty(),
                GhostState::ReturningToHouse | GhostState::EnteringHouse => ghost.update(&ctx, self.rng.as_mut()),
                _ => {}
            }
        }
        self.timer_mut().tick();
    }

    fn update_pacman_dying(&mut self) {
        if self.timer().expired() {
            let next = if self.session.lives > 0 {
                GameState::Ready
            } else {
                GameState::GameOver
            };
            self.change_state(next);
            return;
        }

        self.timer_mut().tick();
        let elapsed = self.timer().elapsed();
        if elapsed == timing::PACMAN_DYING_HIDE_GHOSTS {
            for ghost in &mut self.ghosts {
                ghost.actor.visible = false;
            }
        } else if elapsed == timing::PACMAN_DYING_ANIMATION {
            self.pac_dying_animation = true;
        } else if elapsed == timing::PACMAN_DYING_LOSE_LIFE {
            self.session.lives = self.session.lives.saturating_sub(1);
            self.pac.actor.visible = false;
            debug!(lives = self.session.lives, "Life lost");
        }
    }

    fn update_changing_level(&mut self) {
        if self.timer().expired() {
            let next = self.session.level + 1;
            self.start_level(next);
            self.change_state(GameState::Ready);
            return;
        }

        self.timer_mut().tick();
        let flashes = level_data(self.session.level).num_flashes;
        let elapsed = self.timer().elapsed();
        let flash_end = timing::LEVEL_COMPLETE_PAUSE + flashes * timing::MAZE_FLASH;
        self.maze_flashing = (timing::LEVEL_COMPLETE_PAUSE..flash_end).contains(&elapsed)
            && (elapsed - timing::LEVEL_COMPLETE_PAUSE) % timing::MAZE_FLASH < timing::MAZE_FLASH / 2;
    }

    fn update_game_over(&mut self) {
        if self.timer().expired() {
            self.change_state(GameState::Intro);
            return;
        }
        self.timer_mut().tick();
    }
}
