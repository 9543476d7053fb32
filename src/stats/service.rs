use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use super::{
    models::{GameResult, StatisticsAggregate},
    repository::StatisticsRepository,
    StatsError,
};

/// Lifetime quiz statistics as seen by the session
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Folds a finished round into the lifetime statistics and persists it
    /// before returning. Returns the updated aggregate.
    async fn record_round(&self, correct: u32, total: u32)
        -> Result<StatisticsAggregate, StatsError>;

    /// Percentage of all answered questions that were correct, `0.0` before the first round
    async fn total_accuracy(&self) -> f64;

    async fn games_played(&self) -> u64;

    /// `None` until the first round has been recorded
    async fn best_game(&self) -> Option<GameResult>;
}

/// Write-through cache over a `StatisticsRepository`.
///
/// The cached aggregate only changes after the repository accepted the new
/// value, so a failed write never shows up in reads.
pub struct StatisticService {
    repository: Arc<dyn StatisticsRepository>,
    aggregate: RwLock<StatisticsAggregate>,
}

impl StatisticService {
    /// Loads the persisted aggregate and wraps the repository
    pub async fn open(repository: Arc<dyn StatisticsRepository>) -> Result<Self, StatsError> {
        let aggregate = repository.load().await?;
        info!(
            games_played = aggregate.games_played,
            total_questions = aggregate.total_questions,
            "Statistics opened"
        );

        Ok(Self {
            repository,
            aggregate: RwLock::new(aggregate),
        })
    }

    pub async fn aggregate(&self) -> StatisticsAggregate {
        self.aggregate.read().await.clone()
    }
}

#[async_trait]
impl StatisticsStore for StatisticService {
    #[instrument(skip(self))]
    async fn record_round(
        &self,
        correct: u32,
        total: u32,
    ) -> Result<StatisticsAggregate, StatsError> {
        if total == 0 {
            return Err(StatsError::Validation(
                "A round must contain at least one question".to_string(),
            ));
        }
        if correct > total {
            return Err(StatsError::Validation(format!(
                "Correct answers ({}) exceed questions asked ({})",
                correct, total
            )));
        }

        // Holding the write lock across the save serialises concurrent recorders
        let mut aggregate = self.aggregate.write().await;
        let mut updated = aggregate.clone();
        updated.record(GameResult::new(correct, total, Utc::now()));

        if let Err(err) = self.repository.save(&updated).await {
            error!(?err, correct, total, "Failed to persist round statistics");
            return Err(err);
        }

        *aggregate = updated.clone();
        info!(
            games_played = updated.games_played,
            accuracy = updated.total_accuracy(),
            "Round recorded"
        );
        Ok(updated)
    }

    async fn total_accuracy(&self) -> f64 {
        self.aggregate.read().await.total_accuracy()
    }

    async fn games_played(&self) -> u64 {
        self.aggregate.read().await.games_played
    }

    async fn best_game(&self) -> Option<GameResult> {
        self.aggregate.read().await.best_game.clone()
    }
}
