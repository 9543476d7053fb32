// Movie catalog collaborators
//
// Everything that knows where movies and posters come from lives here. The rest
// of the crate only sees the `MovieCatalogSource` and `ImageFetcher` traits.

pub use errors::{CatalogError, ImageFetchError};
pub use images::{AssetImageFetcher, HttpImageFetcher, ImageFetcher};
pub use models::{MostPopularMovies, Movie};
pub use source::{HttpMovieCatalogSource, MovieCatalogSource, StaticMovieCatalogSource};

mod errors;
mod images;
mod models;
mod source;

#[cfg(test)]
mod test_server;
