//! This module contains the main game logic and state.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use strum::EnumCount;
use time::OffsetDateTime;
use tracing::{debug, info, trace_span, warn};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{GameEvent, Intents};
use crate::game::highscore::{HighScoreStore, JsonFileStore, MemoryStore};
use crate::game::level::{hunting_phase_duration, is_scatter_phase, level_data, LevelData};
use crate::game::session::Session;
use crate::game::state::GameState;
use crate::map::food::FoodState;
use crate::map::world::World;
use crate::systems::bonus::Bonus;
use crate::systems::ghost::{Ghost, GhostId};
use crate::systems::player::Pac;
use crate::systems::timer::TickTimer;

pub mod highscore;
mod hunting;
pub mod level;
pub mod session;
pub mod snapshot;
pub mod state;

/// The whole simulation: maze, actors, score and the top-level state machine.
///
/// Call [`Game::update`] once per tick with that tick's intents.
pub struct Game {
    config: GameConfig,
    world: World,
    food: FoodState,
    pac: Pac,
    ghosts: [Ghost; GhostId::COUNT],
    bonus: Bonus,
    session: Session,
    state: GameState,
    timers: [TickTimer; GameState::COUNT],
    rng: Box<dyn RngCore + Send>,
    store: Box<dyn HighScoreStore + Send>,
    events: Vec<GameEvent>,
    intents: Intents,
    tick: u64,
    /// The next (or current) Ready state is the first of a new game.
    new_game_ready: bool,
    maze_flashing: bool,
    pac_dying_animation: bool,
}

impl Game {
    /// Creates a game on the arcade maze, seeded and stored as `config` says.
    pub fn new(config: GameConfig) -> Game {
        let rng = Box::new(SmallRng::seed_from_u64(config.seed));
        let store: Box<dyn HighScoreStore + Send> = match &config.high_score_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        Self::with_parts(config, World::arcade(), rng, store)
    }

    /// Creates a game on a custom maze layout.
    pub fn with_layout(config: GameConfig, layout: &[&str]) -> GameResult<Game> {
        let world = World::new(layout)?;
        let rng = Box::new(SmallRng::seed_from_u64(config.seed));
        Ok(Self::with_parts(config, world, rng, Box::new(MemoryStore::new())))
    }

    /// Creates a game with an injected random source and high-score store.
    pub fn with_parts(
        config: GameConfig,
        world: World,
        rng: Box<dyn RngCore + Send>,
        store: Box<dyn HighScoreStore + Send>,
    ) -> Game {
        let mut pac = Pac::new(&world);
        pac.immune = config.immune;
        pac.autopilot = config.autopilot;

        Game {
            food: FoodState::new(world.food_count()),
            pac,
            ghosts: GhostId::ALL.map(Ghost::new),
            bonus: Bonus::default(),
            session: Session::new(&config),
            state: GameState::Boot,
            timers: [TickTimer::default(); GameState::COUNT],
            rng,
            store,
            events: Vec::new(),
            intents: Intents::empty(),
            tick: 0,
            new_game_ready: false,
            maze_flashing: false,
            pac_dying_animation: false,
            world,
            config,
        }
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self, intents: Intents) {
        self.tick += 1;
        let span = trace_span!("tick", tick = self.tick);
        let _enter = span.enter();

        self.intents = intents;
        self.handle_commands();
        self.update_state();
    }

    fn handle_commands(&mut self) {
        if self.intents.contains(Intents::TOGGLE_AUTOPILOT) {
            self.pac.autopilot = !self.pac.autopilot;
            info!(autopilot = self.pac.autopilot, "Autopilot toggled");
        }
        if self.intents.contains(Intents::TOGGLE_IMMUNE) {
            self.pac.immune = !self.pac.immune;
            info!(immune = self.pac.immune, "Immunity toggled");
        }
        if self.intents.contains(Intents::FINISH_STATE) {
            debug!(state = ?self.state, "Finishing state");
            self.timer_mut().expire();
        }
        if self.state == GameState::Hunting {
            if self.intents.contains(Intents::KILL_ALL_GHOSTS) {
                self.kill_all_ghosts();
            } else if self.intents.contains(Intents::SKIP_LEVEL) {
                self.eat_all_food();
            }
        }
    }

    /// The timer of the current state.
    pub fn timer(&self) -> &TickTimer {
        &self.timers[self.state.index()]
    }

    fn timer_mut(&mut self) -> &mut TickTimer {
        &mut self.timers[self.state.index()]
    }

    fn level(&self) -> LevelData {
        *level_data(self.session.level)
    }

    fn set_actors_visible(&mut self, visible: bool) {
        self.pac.actor.visible = visible;
        for ghost in &mut self.ghosts {
            ghost.actor.visible = visible;
        }
    }

    /// Puts every actor back on its start position.
    fn reset_actors(&mut self) {
        self.pac.reset(&self.world);
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.bonus.reset();
        self.session.ghosts_killed_in_power = 0;
    }

    fn start_game(&mut self) {
        self.session.start_game(&self.config);
        self.new_game_ready = true;
        self.start_level(self.config.start_level);
        info!(level = self.session.level, lives = self.session.lives, "Game started");
    }

    fn start_level(&mut self, level: u32) {
        self.session.start_level(level);
        self.food.reset();
        self.bonus.reset();
        for ghost in &mut self.ghosts {
            ghost.dot_counter = 0;
            ghost.elroy = 0;
        }
        debug!(level, "Level started");
    }

    fn start_hunting_phase(&mut self, phase: usize) {
        self.session.hunting_phase = phase;
        let duration = hunting_phase_duration(self.session.level, phase);
        self.timers[GameState::Hunting.index()].start(duration);
        let scatter = is_scatter_phase(phase);
        self.events.push(GameEvent::HuntingPhaseStarted { phase, scatter });
        debug!(phase, scatter, duration = ?duration, "Hunting phase started");
    }

    fn load_high_score(&mut self) {
        match self.store.load() {
            Ok(Some(record)) => {
                debug!(points = record.points, level = record.level, "High score loaded");
                self.session.high_score = record;
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "Could not load high score"),
        }
    }

    /// Writes the current high score to the store, stamped with the current time if this
    /// game has beaten it.
    pub fn save_high_score(&mut self) -> GameResult<()> {
        let mut record = self.session.high_score;
        if self.session.high_score_beaten {
            record.achieved_at = OffsetDateTime::now_utc();
        }
        self.store.save(&record)?;
        Ok(())
    }

    fn persist_high_score(&mut self) {
        if let Err(error) = self.save_high_score() {
            warn!(%error, "Could not save high score");
        }
    }

    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn food(&self) -> &FoodState {
        &self.food
    }

    pub fn pac(&self) -> &Pac {
        &self.pac
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn bonus(&self) -> &Bonus {
        &self.bonus
    }

    pub fn maze_flashing(&self) -> bool {
        self.maze_flashing
    }

    /// Direct access to Pac-Man for scripted scenarios and debugging tools.
    pub fn pac_mut(&mut self) -> &mut Pac {
        &mut self.pac
    }

    /// Direct access to the food state. Food eaten this way is not scored or counted.
    pub fn food_mut(&mut self) -> &mut FoodState {
        &mut self.food
    }

    /// Direct access to a ghost for scripted scenarios and debugging tools.
    pub fn ghost_mut(&mut self, id: GhostId) -> &mut Ghost {
        &mut self.ghosts[id.index()]
    }
}
