use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{CatalogError, MostPopularMovies, Movie};

/// Where the movie pool comes from. The only network boundary of the quiz.
#[async_trait]
pub trait MovieCatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Movie>, CatalogError>;

    /// Get a human-readable name for this source (for logging/debugging)
    fn source_name(&self) -> &'static str;
}

/// Fetches the Top-250 feed over HTTP
pub struct HttpMovieCatalogSource {
    http_client: reqwest::Client,
    catalog_url: String,
}

impl HttpMovieCatalogSource {
    pub fn new(http_client: reqwest::Client, catalog_url: impl Into<String>) -> Self {
        Self {
            http_client,
            catalog_url: catalog_url.into(),
        }
    }
}

#[async_trait]
impl MovieCatalogSource for HttpMovieCatalogSource {
    #[instrument(skip(self), fields(url = %self.catalog_url))]
    async fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        info!("Requesting movie catalog");

        let response = self.http_client.get(&self.catalog_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Catalog response received");

        let feed = MostPopularMovies::from_json(&body)?;
        info!(movies = feed.items.len(), "Movie catalog decoded");

        Ok(feed.items)
    }

    fn source_name(&self) -> &'static str {
        "HttpMovieCatalogSource"
    }
}

/// A fixed movie list. Used for offline play and deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMovieCatalogSource {
    movies: Vec<Movie>,
}

impl StaticMovieCatalogSource {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// The ten bundled posters with their real ratings
    pub fn classic_ten() -> Self {
        let movies = [
            ("The Godfather", 9.2),
            ("The Dark Knight", 9.0),
            ("Kill Bill", 8.1),
            ("The Avengers", 8.0),
            ("Deadpool", 8.0),
            ("The Green Knight", 6.6),
            ("Old", 5.8),
            ("The Ice Age Adventures of Buck Wild", 4.3),
            ("Tesla", 5.1),
            ("Vivarium", 5.8),
        ]
        .into_iter()
        .map(|(title, rating)| Movie::new(title, Some(rating), format!("{}.jpg", title)))
        .collect();

        Self::new(movies)
    }
}

#[async_trait]
impl MovieCatalogSource for StaticMovieCatalogSource {
    async fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.movies.clone())
    }

    fn source_name(&self) -> &'static str {
        "StaticMovieCatalogSource"
    }
}
