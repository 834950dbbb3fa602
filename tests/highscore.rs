use std::fs;
use std::path::PathBuf;

use pacman_core::config::GameConfig;
use pacman_core::error::PersistenceError;
use pacman_core::events::Intents;
use pacman_core::game::highscore::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};
use pacman_core::game::Game;
use pacman_core::map::world::World;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;
use time::macros::datetime;
use time::OffsetDateTime;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{}-{}", name, std::process::id()))
        .join("highscore.json")
}

#[test]
fn test_json_store_round_trip() {
    let path = temp_file("highscore-round-trip");
    let record = HighScore {
        points: 31_450,
        level: 7,
        achieved_at: datetime!(2024-03-01 18:30:00 UTC),
    };

    let mut store = JsonFileStore::new(&path);
    store.save(&record).expect("save");
    let loaded = JsonFileStore::new(&path).load().expect("load");

    assert_eq!(loaded, Some(record));
    let _ = fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn test_json_store_missing_file_is_empty() {
    let mut store = JsonFileStore::new(temp_file("highscore-missing"));

    assert_that(&store.load().expect("load")).is_none();
}

#[test]
fn test_json_store_rejects_garbage() {
    let path = temp_file("highscore-garbage");
    fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
    fs::write(&path, "not json").expect("write");

    let result = JsonFileStore::new(&path).load();

    assert!(matches!(result, Err(PersistenceError::Json(_))));
    let _ = fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn test_memory_store_clones_share_record() {
    let store = MemoryStore::new();
    let mut writer = store.clone();
    assert_that(&store.record()).is_none();

    writer.save(&HighScore::default()).expect("save");

    assert_eq!(store.record(), Some(HighScore::default()));
}

#[test]
fn test_game_saves_to_configured_file() {
    let path = temp_file("highscore-game");
    let mut game = Game::new(GameConfig {
        high_score_path: Some(path.clone()),
        ..GameConfig::default()
    });
    game.update(Intents::empty());
    game.update(Intents::START);

    game.save_high_score().expect("save");

    let loaded = JsonFileStore::new(&path).load().expect("load").expect("record");
    assert_eq!(loaded.points, 0);
    assert_eq!(loaded.level, 1);
    let _ = fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn test_beaten_record_is_stamped_when_saved() {
    let store = MemoryStore::new();
    let mut game = Game::with_parts(
        GameConfig::default(),
        World::arcade(),
        Box::new(SmallRng::seed_from_u64(1)),
        Box::new(store.clone()),
    );
    game.update(Intents::empty());
    game.update(Intents::START);
    game.update(Intents::FINISH_STATE);
    while game.session().score == 0 {
        game.update(Intents::empty());
    }

    // The running session never reads the clock.
    assert_eq!(game.session().high_score.achieved_at, OffsetDateTime::UNIX_EPOCH);

    game.save_high_score().expect("save");
    let record = store.record().expect("record");
    assert_eq!(record.points, game.session().score);
    assert_that(&record.achieved_at).is_greater_than(OffsetDateTime::UNIX_EPOCH);
}
