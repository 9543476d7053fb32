use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single completed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub correct: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
}

impl GameResult {
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    /// Only the raw correct count is compared; total and date are ignored,
    /// so a perfect 5/5 never beats a 9/10. Ties are not better.
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}

/// Lifetime statistics as persisted under four logical keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsAggregate {
    #[serde(rename = "correct_answers")]
    pub total_correct: u64,
    pub total_questions: u64,
    #[serde(rename = "games_count")]
    pub games_played: u64,
    /// `None` until the first round; that round becomes the record even with
    /// zero correct answers, rather than starting from an empty 0/0 record.
    #[serde(default)]
    pub best_game: Option<GameResult>,
}

impl StatisticsAggregate {
    /// Folds a finished round into the lifetime counters.
    ///
    /// The best game is replaced only by a strictly better result, which keeps
    /// the earliest of several equally good rounds. A fresh aggregate adopts the
    /// first recorded round whatever its score.
    pub fn record(&mut self, result: GameResult) {
        self.total_correct += u64::from(result.correct);
        self.total_questions += u64::from(result.total);
        self.games_played += 1;

        let replace = match &self.best_game {
            Some(best) => result.is_better_than(best),
            None => true,
        };
        if replace {
            self.best_game = Some(result);
        }
    }

    pub fn total_accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        100.0 * self.total_correct as f64 / self.total_questions as f64
    }
}
