//! Score, lives and the other per-game counters.

use tracing::info;

use crate::config::GameConfig;
use crate::game::highscore::HighScore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub high_score: HighScore,
    /// This game's score has beaten the high score it started with.
    pub high_score_beaten: bool,
    pub extra_life_score: u32,
    pub extra_life_awarded: bool,
    /// Index of the current scatter/chase phase.
    pub hunting_phase: usize,
    pub global_dot_counter: u32,
    pub global_dot_counter_enabled: bool,
    /// Ghosts eaten since Pac-Man last gained power; indexes the bounty ladder.
    pub ghosts_killed_in_power: u8,
    pub ghosts_killed_in_level: u32,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: config.start_level,
            score: 0,
            lives: config.lives,
            high_score: HighScore::default(),
            high_score_beaten: false,
            extra_life_score: config.extra_life_score,
            extra_life_awarded: false,
            hunting_phase: 0,
            global_dot_counter: 0,
            global_dot_counter_enabled: false,
            ghosts_killed_in_power: 0,
            ghosts_killed_in_level: 0,
        }
    }

    /// Resets everything but the high score for a new game.
    pub fn start_game(&mut self, config: &GameConfig) {
        let high_score = self.high_score;
        *self = Self::new(config);
        self.high_score = high_score;
    }

    /// Resets the counters that live for a single level.
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.hunting_phase = 0;
        self.ghosts_killed_in_power = 0;
        self.ghosts_killed_in_level = 0;
        self.global_dot_counter = 0;
        self.global_dot_counter_enabled = false;
    }

    /// After a lost life the house releases ghosts by the global dot counter.
    pub fn reset_global_dot_counter(&mut self) {
        self.global_dot_counter = 0;
        self.global_dot_counter_enabled = true;
    }

    /// Adds points, raising the high score if it is beaten. The record is timestamped when
    /// it is saved, not here.
    ///
    /// Returns `true` when this addition crossed the extra-life threshold, which happens at
    /// most once per game.
    pub fn add_points(&mut self, points: u32) -> bool {
        let before = self.score;
        self.score += points;

        if self.score > self.high_score.points {
            self.high_score.points = self.score;
            self.high_score.level = self.level;
            self.high_score_beaten = true;
        }

        if !self.extra_life_awarded && before < self.extra_life_score && self.score >= self.extra_life_score {
            self.extra_life_awarded = true;
            self.lives += 1;
            info!(score = self.score, lives = self.lives, "Extra life awarded");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_life_once() {
        let mut session = Session::new(&GameConfig::default());
        session.score = 9_990;
        assert!(!session.add_points(0));
        assert!(session.add_points(10));
        assert_eq!(session.lives, 4);
        session.score = 19_990;
        assert!(!session.add_points(10));
        assert_eq!(session.lives, 4);
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut session = Session::new(&GameConfig::default());
        session.high_score.points = 50;
        session.add_points(40);
        assert_eq!(session.high_score.points, 50);
        session.add_points(20);
        assert_eq!(session.high_score.points, 60);
    }

    #[test]
    fn test_replayed_sessions_compare_equal() {
        let mut first = Session::new(&GameConfig::default());
        let mut second = Session::new(&GameConfig::default());
        for points in [10, 50, 200, 10] {
            first.add_points(points);
            second.add_points(points);
        }
        assert!(first.high_score_beaten);
        assert_eq!(first, second);
    }

    #[test]
    fn test_start_game_keeps_high_score() {
        let mut session = Session::new(&GameConfig::default());
        session.add_points(500);
        session.start_game(&GameConfig::default());
        assert_eq!(session.score, 0);
        assert!(!session.high_score_beaten);
        assert_eq!(session.high_score.points, 500);
    }
}
