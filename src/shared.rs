use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::catalog::{
    AssetImageFetcher, HttpImageFetcher, HttpMovieCatalogSource, ImageFetcher,
    MovieCatalogSource, StaticMovieCatalogSource,
};
use crate::config::{ConfigError, QuizConfig};
use crate::event::EventBus;
use crate::quiz::SessionError;
use crate::stats::{FileStatisticsRepository, StatisticService, StatsError};

/// Collaborators a session is built from
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MovieCatalogSource>,
    pub images: Arc<dyn ImageFetcher>,
    pub statistics: Arc<StatisticService>,
    pub event_bus: EventBus,
}

impl AppState {
    pub fn new(
        source: Arc<dyn MovieCatalogSource>,
        images: Arc<dyn ImageFetcher>,
        statistics: Arc<StatisticService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            source,
            images,
            statistics,
            event_bus,
        }
    }

    /// Builds the network-backed or offline collaborators the config asks for
    pub async fn from_config(config: &QuizConfig) -> Result<Self, AppError> {
        let repository = Arc::new(FileStatisticsRepository::new(&config.stats_path));
        let statistics = Arc::new(StatisticService::open(repository).await?);

        let (source, images): (Arc<dyn MovieCatalogSource>, Arc<dyn ImageFetcher>) =
            if config.offline {
                info!(assets = %config.assets_dir.display(), "Using bundled catalog");
                (
                    Arc::new(StaticMovieCatalogSource::classic_ten()),
                    Arc::new(AssetImageFetcher::new(&config.assets_dir)),
                )
            } else {
                let http_client = reqwest::Client::builder()
                    .timeout(config.http_timeout)
                    .build()?;
                (
                    Arc::new(HttpMovieCatalogSource::new(
                        http_client.clone(),
                        config.catalog_endpoint(),
                    )),
                    Arc::new(HttpImageFetcher::new(http_client)),
                )
            };

        Ok(Self::new(source, images, statistics, EventBus::default()))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
