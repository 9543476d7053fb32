use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::ImageFetchError;

/// Retrieves poster bytes for a movie's image reference
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, ImageFetchError>;
}

/// Downloads posters over HTTP
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, ImageFetchError> {
        let response = self.http_client.get(image_ref).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Poster downloaded");
        Ok(bytes.to_vec())
    }
}

/// Reads bundled posters from a local directory
#[derive(Debug, Clone)]
pub struct AssetImageFetcher {
    root: PathBuf,
}

impl AssetImageFetcher {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ImageFetcher for AssetImageFetcher {
    async fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, ImageFetchError> {
        let path = self.root.join(image_ref);
        let bytes = tokio::fs::read(&path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Poster loaded from assets");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_server::serve_once;

    #[tokio::test]
    async fn asset_fetcher_reads_file_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Old.jpg"), [0xFF, 0xD8, 0xFF]).unwrap();

        let fetcher = AssetImageFetcher::new(dir.path());
        let bytes = fetcher.fetch("Old.jpg").await.unwrap();

        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn asset_fetcher_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetImageFetcher::new(dir.path());

        let err = fetcher.fetch("Tesla.jpg").await.unwrap_err();
        assert!(matches!(err, ImageFetchError::Io(_)));
    }

    #[tokio::test]
    async fn http_fetcher_returns_body_bytes() {
        let url = serve_once("200 OK", &[0xFF, 0xD8, 0xFF, 0xE0]).await;
        let fetcher = HttpImageFetcher::new(reqwest::Client::new());

        let bytes = fetcher.fetch(&url).await.unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[tokio::test]
    async fn http_fetcher_rejects_missing_poster() {
        let url = serve_once("404 Not Found", b"").await;
        let fetcher = HttpImageFetcher::new(reqwest::Client::new());

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ImageFetchError::Status(404)));
    }
}
