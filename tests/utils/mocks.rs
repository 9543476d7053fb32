#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use movie_quiz::catalog::{CatalogError, ImageFetchError, ImageFetcher, Movie, MovieCatalogSource};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Catalog that fails its first `failures` fetches, then serves `movies`
pub struct MockCatalogSource {
    movies: Vec<Movie>,
    failures: usize,
    fetches: AtomicUsize,
}

impl MockCatalogSource {
    pub fn new(movies: Vec<Movie>, failures: usize) -> Self {
        Self {
            movies,
            failures,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieCatalogSource for MockCatalogSource {
    async fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        let attempt = self.fetches.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(CatalogError::Status(503));
        }
        Ok(self.movies.clone())
    }

    fn source_name(&self) -> &'static str {
        "MockCatalogSource"
    }
}

/// Records requested poster URLs; serves fixed bytes or a 404
pub struct MockImageFetcher {
    poster: Option<Vec<u8>>,
    requested: RwLock<Vec<String>>,
}

impl MockImageFetcher {
    pub fn serving(poster: Vec<u8>) -> Self {
        Self {
            poster: Some(poster),
            requested: RwLock::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            poster: None,
            requested: RwLock::new(Vec::new()),
        }
    }

    pub async fn requested(&self) -> Vec<String> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, ImageFetchError> {
        self.requested.write().await.push(image_ref.to_string());
        self.poster.clone().ok_or(ImageFetchError::Status(404))
    }
}
