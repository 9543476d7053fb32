use thiserror::Error;

/// Failure to obtain the movie pool. Recoverable: the session offers a retry.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog request failed with status {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Catalog API error: {0}")]
    Api(String),
}

/// Failure to obtain poster bytes for a single question. Never fatal.
#[derive(Debug, Clone, Error)]
pub enum ImageFetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Image request failed with status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ImageFetchError {
    fn from(err: reqwest::Error) -> Self {
        ImageFetchError::Network(err.to_string())
    }
}

impl From<std::io::Error> for ImageFetchError {
    fn from(err: std::io::Error) -> Self {
        ImageFetchError::Io(err.to_string())
    }
}
