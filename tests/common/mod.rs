#![allow(dead_code)]

use pacman_core::config::GameConfig;
use pacman_core::events::Intents;
use pacman_core::game::level::level_data;
use pacman_core::game::state::GameState;
use pacman_core::game::Game;
use pacman_core::map::world::World;
use pacman_core::systems::ghost::GhostContext;

pub fn test_config() -> GameConfig {
    GameConfig {
        seed: 42,
        ..GameConfig::default()
    }
}

/// Boots a game, inserts a credit and skips the Ready state.
pub fn game_in_hunting(config: GameConfig) -> Game {
    let mut game = Game::new(config);
    enter_hunting(&mut game);
    game
}

/// Drives a freshly created game from Boot into its first Hunting tick.
pub fn enter_hunting(game: &mut Game) {
    game.update(Intents::empty());
    assert_eq!(game.state(), GameState::Intro);
    game.update(Intents::START);
    assert_eq!(game.state(), GameState::Ready);
    game.update(Intents::FINISH_STATE);
    assert_eq!(game.state(), GameState::Hunting);
    game.drain_events();
}

/// Updates the game until `done` holds, returning the number of ticks it took.
///
/// Panics if it takes more than `max_ticks`.
pub fn run_until(game: &mut Game, max_ticks: u32, done: impl Fn(&Game) -> bool) -> u32 {
    for tick in 1..=max_ticks {
        game.update(Intents::empty());
        if done(game) {
            return tick;
        }
    }
    panic!("condition not reached within {max_ticks} ticks (state {:?})", game.state());
}

/// A ghost context on level 1 with Pac-Man far away and chasing enabled.
pub fn ghost_context(world: &World) -> GhostContext<'_> {
    GhostContext {
        world,
        level: level_data(1),
        pac_tile: world.pacman_start(),
        pac_facing: pacman_core::map::direction::Direction::Left,
        pac_has_power: false,
        blinky_tile: glam::IVec2::new(13, 14),
        scatter: false,
    }
}

/// Places Pac-Man on the first uneaten pellet and runs one tick so he eats it.
///
/// Pac-Man is kept resting so he stays on the tile. Energizers are skipped.
pub fn eat_next_pellet(game: &mut Game) {
    let world = game.world();
    let index = (0..world.food_count())
        .find(|&i| !world.is_energizer(i) && !game.food().is_eaten(i))
        .expect("a pellet left to eat");
    let tile = world.food_tile(index);

    let pac = game.pac_mut();
    pac.actor.place_at(tile, glam::Vec2::ZERO);
    pac.rest_ticks = 1;
    game.update(Intents::empty());
    assert!(game.food().is_eaten(index), "pellet {index} at {tile} was not eaten");
}

/// Eats pellets without scoring or counting them until `remaining` food is left.
pub fn eat_silently_until(game: &mut Game, remaining: usize) {
    let total = game.world().food_count();
    for index in 0..total {
        if game.food().remaining() == remaining {
            break;
        }
        game.food_mut().eat(index);
    }
}
