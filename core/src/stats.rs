use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// What a finished game reports, delivered once per game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub difficulty: DifficultyKey,
    pub elapsed_secs: u32,
}

/// Consumer of finished games, typically backed by persistent storage.
pub trait StatsRecorder {
    fn record_outcome(&mut self, outcome: &GameOutcome) -> GameStats;
}

/// Aggregate statistics across all recorded games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub best_times: BTreeMap<DifficultyKey, u32>,
    pub last_game_date: Option<DateTime<Utc>>,
}

impl StorageKey for GameStats {
    const KEY: &'static str = "demineur:stats";
}

impl GameStats {
    /// Difficulties that keep a best time. One-shot wins are luck, custom boards aren't comparable.
    pub const fn tracks_best_time(key: DifficultyKey) -> bool {
        matches!(
            key,
            DifficultyKey::Easy | DifficultyKey::Medium | DifficultyKey::Hard
        )
    }

    pub fn best_time(&self, key: DifficultyKey) -> Option<u32> {
        self.best_times.get(&key).copied()
    }

    /// Percentage of recorded games that were won.
    pub fn win_rate(&self) -> f32 {
        if self.games_played > 0 {
            self.games_won as f32 / self.games_played as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn record_at(&mut self, outcome: &GameOutcome, at: DateTime<Utc>) {
        self.games_played += 1;
        if outcome.won {
            self.games_won += 1;
            if Self::tracks_best_time(outcome.difficulty) {
                self.best_times
                    .entry(outcome.difficulty)
                    .and_modify(|best| *best = (*best).min(outcome.elapsed_secs))
                    .or_insert(outcome.elapsed_secs);
            }
        }
        self.last_game_date = Some(at);
        log::debug!(
            "Recorded {} game on {} in {}s, {} played",
            if outcome.won { "won" } else { "lost" },
            outcome.difficulty,
            outcome.elapsed_secs,
            self.games_played
        );
    }
}

impl StatsRecorder for GameStats {
    fn record_outcome(&mut self, outcome: &GameOutcome) -> GameStats {
        self.record_at(outcome, Utc::now());
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn outcome(won: bool, difficulty: DifficultyKey, elapsed_secs: u32) -> GameOutcome {
        GameOutcome {
            won,
            difficulty,
            elapsed_secs,
        }
    }

    #[test]
    fn best_time_only_improves_on_wins() {
        let mut stats = GameStats::default();

        stats.record_outcome(&outcome(true, DifficultyKey::Easy, 90));
        stats.record_outcome(&outcome(false, DifficultyKey::Easy, 10));
        stats.record_outcome(&outcome(true, DifficultyKey::Easy, 120));
        let stats = stats.record_outcome(&outcome(true, DifficultyKey::Easy, 45));

        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 3);
        assert_eq!(stats.best_time(DifficultyKey::Easy), Some(45));
        assert_eq!(stats.best_time(DifficultyKey::Hard), None);
        assert!(stats.last_game_date.is_some());
    }

    #[test]
    fn untracked_difficulties_count_but_keep_no_time() {
        let mut stats = GameStats::default();

        stats.record_outcome(&outcome(true, DifficultyKey::OneShot, 1));
        stats.record_outcome(&outcome(true, DifficultyKey::Custom, 30));

        assert_eq!(stats.games_won, 2);
        assert!(stats.best_times.is_empty());
    }

    #[test]
    fn win_rate_handles_empty_stats() {
        let mut stats = GameStats::default();
        assert_eq!(stats.win_rate(), 0.0);

        stats.record_outcome(&outcome(true, DifficultyKey::Medium, 200));
        stats.record_outcome(&outcome(false, DifficultyKey::Medium, 20));
        assert_eq!(stats.win_rate(), 50.0);
    }

    #[test]
    fn stored_stats_survive_a_round_trip() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut stats = GameStats::default();
        stats.record_at(&outcome(true, DifficultyKey::Hard, 300), at);

        let blob = stats.to_stored().unwrap();
        let restored = GameStats::from_stored(Some(&blob));

        assert_eq!(restored, stats);
        assert!(blob.contains("\"hard\":300"));
    }

    #[test]
    fn corrupt_blob_falls_back_to_default() {
        assert_eq!(GameStats::from_stored(Some("{not json")), GameStats::default());
        assert_eq!(GameStats::from_stored(None), GameStats::default());
    }
}
