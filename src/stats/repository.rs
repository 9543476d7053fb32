use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::{models::StatisticsAggregate, StatsError};

/// Durable medium for the lifetime statistics
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Returns the persisted aggregate, or an empty one on first launch
    async fn load(&self) -> Result<StatisticsAggregate, StatsError>;
    async fn save(&self, aggregate: &StatisticsAggregate) -> Result<(), StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStatisticsRepository {
    aggregate: Arc<RwLock<StatisticsAggregate>>,
}

impl InMemoryStatisticsRepository {
    pub fn new() -> Self {
        Self {
            aggregate: Arc::new(RwLock::new(StatisticsAggregate::default())),
        }
    }
}

#[async_trait]
impl StatisticsRepository for InMemoryStatisticsRepository {
    async fn load(&self) -> Result<StatisticsAggregate, StatsError> {
        let aggregate = self.aggregate.read().await;
        Ok(aggregate.clone())
    }

    async fn save(&self, aggregate: &StatisticsAggregate) -> Result<(), StatsError> {
        let mut stored = self.aggregate.write().await;
        *stored = aggregate.clone();
        Ok(())
    }
}

/// Stores the aggregate as a single JSON document.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so an interrupted write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStatisticsRepository {
    path: PathBuf,
}

impl FileStatisticsRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl StatisticsRepository for FileStatisticsRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<StatisticsAggregate, StatsError> {
        if !tokio::fs::try_exists(&self.path).await? {
            info!("No statistics file yet - starting from empty statistics");
            return Ok(StatisticsAggregate::default());
        }

        let json = tokio::fs::read_to_string(&self.path).await?;
        let aggregate: StatisticsAggregate = serde_json::from_str(&json)?;
        debug!(games_played = aggregate.games_played, "Statistics loaded");
        Ok(aggregate)
    }

    #[instrument(skip(self, aggregate), fields(path = %self.path.display()))]
    async fn save(&self, aggregate: &StatisticsAggregate) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(aggregate)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(games_played = aggregate.games_played, "Statistics persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GameResult;
    use chrono::Utc;

    fn sample_aggregate() -> StatisticsAggregate {
        let mut aggregate = StatisticsAggregate::default();
        aggregate.record(GameResult::new(7, 10, Utc::now()));
        aggregate
    }

    #[tokio::test]
    async fn in_memory_round_trips_latest_save() {
        let repo = InMemoryStatisticsRepository::new();
        assert_eq!(repo.load().await.unwrap(), StatisticsAggregate::default());

        let aggregate = sample_aggregate();
        repo.save(&aggregate).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), aggregate);
    }

    #[tokio::test]
    async fn missing_file_loads_empty_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStatisticsRepository::new(dir.path().join("statistics.json"));

        let aggregate = repo.load().await.unwrap();
        assert_eq!(aggregate, StatisticsAggregate::default());
    }

    #[tokio::test]
    async fn file_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("statistics.json");
        let aggregate = sample_aggregate();

        FileStatisticsRepository::new(&path)
            .save(&aggregate)
            .await
            .unwrap();

        let reopened = FileStatisticsRepository::new(&path);
        assert_eq!(reopened.load().await.unwrap(), aggregate);
        assert!(!reopened.temp_path().exists());
    }

    #[tokio::test]
    async fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStatisticsRepository::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StatsError::Serialization(_)));
    }
}
