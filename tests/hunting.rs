use glam::{IVec2, Vec2};
use pacman_core::config::GameConfig;
use pacman_core::events::{GameEvent, Intents};
use pacman_core::game::level::level_data;
use pacman_core::game::state::GameState;
use pacman_core::game::Game;
use pacman_core::systems::ghost::{GhostId, GhostState};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{eat_next_pellet, eat_silently_until, game_in_hunting, run_until, test_config};

fn immune_config() -> GameConfig {
    GameConfig {
        immune: true,
        ..test_config()
    }
}

/// Ticks once with Pac-Man standing still.
fn idle(game: &mut Game) {
    game.pac_mut().rest_ticks = 1;
    game.update(Intents::empty());
}

/// Lets Blinky catch Pac-Man, then plays the next life up to its first Hunting tick.
fn lose_life(game: &mut Game) {
    let pac = game.pac_mut();
    pac.actor.place_at(IVec2::new(13, 26), Vec2::ZERO);
    pac.rest_ticks = 1;
    let position = game.pac().actor.position;
    let blinky = game.ghost_mut(GhostId::Blinky);
    blinky.set_state(GhostState::HuntingPac);
    blinky.actor.position = position;
    blinky.actor.new_tile_entered = true;

    game.update(Intents::empty());
    assert_eq!(game.state(), GameState::PacmanDying);

    run_until(game, 300, |g| g.state() == GameState::Ready);
    game.pac_mut().immune = true;
    game.update(Intents::FINISH_STATE);
    assert_eq!(game.state(), GameState::Hunting);
}

fn state_of(game: &Game, id: GhostId) -> GhostState {
    game.ghost(id).state
}

#[test]
fn test_private_dot_counters_release_inky_then_clyde() {
    let mut game = game_in_hunting(immune_config());
    idle(&mut game);
    assert_eq!(state_of(&game, GhostId::Pinky), GhostState::LeavingHouse);
    assert_eq!(game.ghost(GhostId::Pinky).dot_counter, 0);

    for _ in 0..29 {
        eat_next_pellet(&mut game);
    }
    assert_eq!(state_of(&game, GhostId::Inky), GhostState::Locked);
    assert_eq!(game.ghost(GhostId::Inky).dot_counter, 29);
    // Only the first locked ghost counts.
    assert_eq!(game.ghost(GhostId::Clyde).dot_counter, 0);

    eat_next_pellet(&mut game);
    assert_eq!(state_of(&game, GhostId::Inky), GhostState::LeavingHouse);

    for _ in 0..59 {
        eat_next_pellet(&mut game);
    }
    assert_eq!(state_of(&game, GhostId::Clyde), GhostState::Locked);
    assert_eq!(game.ghost(GhostId::Clyde).dot_counter, 59);
    assert_eq!(game.ghost(GhostId::Inky).dot_counter, 30);

    eat_next_pellet(&mut game);
    assert_eq!(state_of(&game, GhostId::Clyde), GhostState::LeavingHouse);
}

#[test]
fn test_global_dot_counter_after_lost_life() {
    let mut game = game_in_hunting(test_config());
    lose_life(&mut game);
    assert_that(&game.session().global_dot_counter_enabled).is_true();

    let releases = [(GhostId::Pinky, 7), (GhostId::Inky, 17), (GhostId::Clyde, 32)];
    let mut eaten = 0;
    for (id, limit) in releases {
        while eaten < limit - 1 {
            eat_next_pellet(&mut game);
            eaten += 1;
        }
        assert_eq!(state_of(&game, id), GhostState::Locked, "{id} before {limit} dots");

        eat_next_pellet(&mut game);
        eaten += 1;
        assert_eq!(state_of(&game, id), GhostState::LeavingHouse, "{id} at {limit} dots");
    }

    assert_eq!(game.session().global_dot_counter, 32);
    assert_that(&game.session().global_dot_counter_enabled).is_false();
    // Private counters were not touched while the global one was in use.
    for id in [GhostId::Pinky, GhostId::Inky, GhostId::Clyde] {
        assert_eq!(game.ghost(id).dot_counter, 0);
    }
}

#[test]
fn test_cruise_elroy_levels_and_speeds() {
    let level = level_data(1);
    let mut game = game_in_hunting(immune_config());
    idle(&mut game);
    idle(&mut game);

    let blinky = game.ghost(GhostId::Blinky);
    assert_eq!(blinky.state, GhostState::HuntingPac);
    assert_eq!(blinky.elroy, 0);
    assert_eq!(blinky.actor.speed, level.ghost_speed);
    assert_eq!(blinky.actor.target_tile, Some(GhostId::Blinky.scatter_tile()));

    eat_silently_until(&mut game, level.elroy1_dots_left + 1);
    eat_next_pellet(&mut game);
    assert_eq!(game.food().remaining(), level.elroy1_dots_left);

    // Still scattering, but an Elroy Blinky keeps chasing Pac-Man.
    assert_eq!(game.session().hunting_phase, 0);
    let blinky = game.ghost(GhostId::Blinky);
    assert_eq!(blinky.elroy, 1);
    assert_eq!(blinky.actor.speed, level.elroy1_speed);
    assert_eq!(blinky.actor.target_tile, Some(game.pac().actor.tile()));

    while game.food().remaining() > level.elroy2_dots_left + 1 {
        eat_next_pellet(&mut game);
    }
    assert_eq!(game.ghost(GhostId::Blinky).elroy, 1);

    eat_next_pellet(&mut game);
    let blinky = game.ghost(GhostId::Blinky);
    assert_eq!(blinky.elroy, 2);
    assert_eq!(blinky.actor.speed, level.elroy2_speed);
}

#[test]
fn test_elroy_stays_suspended_while_pacman_has_power() {
    let mut game = game_in_hunting(immune_config());
    game.ghost_mut(GhostId::Clyde).set_state(GhostState::LeavingHouse);
    game.ghost_mut(GhostId::Blinky).elroy = -1;
    game.pac_mut().start_power(3);

    // Blinky is released while Pac-Man still has power.
    idle(&mut game);
    assert_that(&game.pac().has_power()).is_true();
    assert_eq!(state_of(&game, GhostId::Blinky), GhostState::Frightened);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, -1);

    idle(&mut game);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, -1);

    idle(&mut game);
    assert_that(&game.pac().has_power()).is_false();
    assert_eq!(state_of(&game, GhostId::Blinky), GhostState::HuntingPac);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, 1);
}

#[test]
fn test_elroy_stays_suspended_after_death_until_clyde_leaves() {
    let mut game = game_in_hunting(test_config());
    game.ghost_mut(GhostId::Blinky).elroy = 2;
    lose_life(&mut game);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, -2);

    eat_next_pellet(&mut game);
    assert_eq!(state_of(&game, GhostId::Blinky), GhostState::HuntingPac);
    assert_eq!(state_of(&game, GhostId::Clyde), GhostState::Locked);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, -2);

    run_until_clyde_leaves(&mut game);
    assert_eq!(game.ghost(GhostId::Blinky).elroy, 2);
}

fn run_until_clyde_leaves(game: &mut Game) {
    for _ in 0..40 {
        if !game.ghost(GhostId::Clyde).is(GhostState::Locked) {
            return;
        }
        assert_eq!(game.ghost(GhostId::Blinky).elroy, -2);
        eat_next_pellet(game);
    }
    panic!("Clyde never left the house");
}

#[test]
fn test_phase_change_reverses_hunting_ghosts() {
    let mut game = game_in_hunting(immune_config());
    for _ in 0..30 {
        game.update(Intents::empty());
    }
    assert_eq!(state_of(&game, GhostId::Blinky), GhostState::HuntingPac);
    game.drain_events();

    game.update(Intents::FINISH_STATE);

    assert_eq!(game.session().hunting_phase, 1);
    assert_that(&game.drain_events()).contains(GameEvent::HuntingPhaseStarted { phase: 1, scatter: false });
    assert_that(&game.ghost(GhostId::Blinky).actor.reverse_requested).is_true();
    assert_that(&game.ghost(GhostId::Inky).actor.reverse_requested).is_false();

    for _ in 0..20 {
        let before = game.ghost(GhostId::Blinky).actor.move_dir;
        game.update(Intents::empty());
        let blinky = game.ghost(GhostId::Blinky);
        if !blinky.actor.reverse_requested {
            assert_eq!(blinky.actor.move_dir, before.opposite());
            return;
        }
    }
    panic!("Blinky never reversed");
}
