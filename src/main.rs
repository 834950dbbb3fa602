//! Headless runner: plays one autopilot game in real time and reports the score.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use pacman_core::config::GameConfig;
use pacman_core::constants::LOOP_TIME;
use pacman_core::events::{GameEvent, Intents};
use pacman_core::game::state::GameState;
use pacman_core::game::Game;
use pacman_core::logging::setup_logging;
use pacman_core::sync::SnapshotBuffer;
use thousands::Separable;
use tracing::{debug, info};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the simulation until the game is over, publishing a snapshot after every tick.
fn simulate(config: GameConfig, buffer: &SnapshotBuffer, running: &AtomicBool) -> anyhow::Result<()> {
    let mut game = Game::new(config);
    let mut next_tick = Instant::now();

    while running.load(Ordering::Acquire) {
        let intents = if game.state() == GameState::Intro {
            Intents::START
        } else {
            Intents::empty()
        };
        game.update(intents);
        buffer.publish(game.snapshot());

        for event in game.drain_events() {
            match event {
                GameEvent::GameOver => running.store(false, Ordering::Release),
                GameEvent::StateChanged { .. } => {}
                other => debug!(event = ?other, "Game event"),
            }
        }

        next_tick += LOOP_TIME;
        let now = Instant::now();
        if next_tick > now {
            spin_sleep::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }

    game.save_high_score().context("Failed to save high score")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = GameConfig {
        autopilot: true,
        ..GameConfig::from_env().context("Failed to load configuration")?
    };
    info!(seed = config.seed, lives = config.lives, "Starting headless simulation");

    let buffer = Arc::new(SnapshotBuffer::new());
    let running = Arc::new(AtomicBool::new(true));

    let simulation = thread::Builder::new().name("simulation".into()).spawn({
        let buffer = Arc::clone(&buffer);
        let running = Arc::clone(&running);
        move || simulate(config, &buffer, &running)
    })?;

    while running.load(Ordering::Acquire) && !simulation.is_finished() {
        thread::sleep(REPORT_INTERVAL);
        buffer.with_latest(|snapshot| {
            if let Some(snapshot) = snapshot {
                info!(
                    tick = snapshot.tick,
                    state = %snapshot.state,
                    level = snapshot.level,
                    lives = snapshot.lives,
                    score = %snapshot.score.separate_with_commas(),
                    food_left = snapshot.food.remaining(),
                    "Progress"
                );
            }
        });
    }

    simulation
        .join()
        .map_err(|_| anyhow::anyhow!("simulation thread panicked"))??;

    if let Some(snapshot) = buffer.latest() {
        info!(
            score = %snapshot.score.separate_with_commas(),
            high_score = %snapshot.high_score.separate_with_commas(),
            level = snapshot.level,
            "Final result"
        );
    }
    Ok(())
}
