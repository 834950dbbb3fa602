use std::sync::Arc;
use std::thread;

use pacman_core::events::Intents;
use pacman_core::game::Game;
use pacman_core::sync::SnapshotBuffer;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_empty_buffer() {
    let buffer = SnapshotBuffer::new();
    assert_that(&buffer.latest()).is_none();
    assert_that(&buffer.with_latest(|snapshot| snapshot.is_some())).is_false();
}

#[test]
fn test_latest_is_last_published() {
    let mut game = Game::new(common::test_config());
    let buffer = SnapshotBuffer::new();

    for _ in 0..3 {
        game.update(Intents::empty());
        buffer.publish(game.snapshot());
    }

    assert_eq!(buffer.latest().map(|s| s.tick), Some(3));
}

#[test]
fn test_reader_on_another_thread() {
    let buffer = Arc::new(SnapshotBuffer::new());
    let writer = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            let mut game = Game::new(common::test_config());
            for _ in 0..100 {
                game.update(Intents::START);
                buffer.publish(game.snapshot());
            }
        })
    };

    let mut last_tick = 0;
    while !writer.is_finished() {
        if let Some(tick) = buffer.with_latest(|snapshot| snapshot.map(|s| s.tick)) {
            assert_that(&tick).is_greater_than_or_equal_to(last_tick);
            last_tick = tick;
        }
    }
    writer.join().expect("writer thread");

    assert_eq!(buffer.latest().map(|s| s.tick), Some(100));
}
