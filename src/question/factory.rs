use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::QuizQuestion;
use crate::catalog::{CatalogError, ImageFetcher, Movie, MovieCatalogSource};

/// Lifecycle of the movie pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// Signals sent from the factory's background tasks to its owner
#[derive(Debug)]
pub enum FactoryEvent {
    CatalogLoaded {
        movie_count: usize,
    },
    CatalogLoadFailed(CatalogError),
    /// `generation` identifies the request that produced the question
    QuestionReady {
        generation: u64,
        question: QuizQuestion,
    },
}

#[derive(Debug)]
struct Catalog {
    state: FactoryState,
    movies: Vec<Movie>,
}

/// Produces one question at a time from the loaded catalog.
///
/// Every request bumps a generation counter. A background task whose
/// generation has been superseded by the time its image arrives drops its
/// question instead of delivering it, so answers never get paired with a
/// question from an older request.
#[derive(Clone)]
pub struct QuestionFactory {
    source: Arc<dyn MovieCatalogSource>,
    images: Arc<dyn ImageFetcher>,
    rating_threshold: f32,
    catalog: Arc<RwLock<Catalog>>,
    generation: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<FactoryEvent>,
}

impl QuestionFactory {
    pub fn new(
        source: Arc<dyn MovieCatalogSource>,
        images: Arc<dyn ImageFetcher>,
        rating_threshold: f32,
        events: mpsc::UnboundedSender<FactoryEvent>,
    ) -> Self {
        Self {
            source,
            images,
            rating_threshold,
            catalog: Arc::new(RwLock::new(Catalog {
                state: FactoryState::Unloaded,
                movies: Vec::new(),
            })),
            generation: Arc::new(AtomicU64::new(0)),
            events,
        }
    }

    pub async fn state(&self) -> FactoryState {
        self.catalog.read().await.state
    }

    pub async fn movie_count(&self) -> usize {
        self.catalog.read().await.movies.len()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a delivered question answers the most recent request
    pub fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    /// Starts fetching the movie pool. Completion is reported as
    /// `CatalogLoaded` or `CatalogLoadFailed`; calling again retries.
    pub async fn load_catalog(&self) -> JoinHandle<()> {
        self.catalog.write().await.state = FactoryState::Loading;

        let source = self.source.clone();
        let catalog = self.catalog.clone();
        let events = self.events.clone();

        info!(source = source.source_name(), "Loading movie catalog");

        tokio::spawn(async move {
            let event = match source.fetch().await {
                Ok(movies) => {
                    let movie_count = movies.len();
                    let mut catalog = catalog.write().await;
                    catalog.movies = movies;
                    catalog.state = FactoryState::Ready;
                    info!(movie_count, "Movie catalog ready");
                    FactoryEvent::CatalogLoaded { movie_count }
                }
                Err(err) => {
                    catalog.write().await.state = FactoryState::Failed;
                    warn!(error = %err, "Movie catalog failed to load");
                    FactoryEvent::CatalogLoadFailed(err)
                }
            };

            if events.send(event).is_err() {
                debug!("Catalog result dropped - factory owner is gone");
            }
        })
    }

    /// Picks a random movie and builds a question from it in the background.
    ///
    /// Returns the request's generation, or `None` when the catalog is not
    /// ready or holds no movies. Either way any earlier pending question is
    /// superseded.
    pub async fn request_next_question(&self) -> Option<u64> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let movie = {
            let catalog = self.catalog.read().await;
            if catalog.state != FactoryState::Ready || catalog.movies.is_empty() {
                debug!(state = ?catalog.state, "Question requested before catalog is usable");
                return None;
            }
            let index = rand::rng().random_range(0..catalog.movies.len());
            catalog.movies[index].clone()
        };

        let current = self.generation.clone();
        let images = self.images.clone();
        let events = self.events.clone();
        let rating_threshold = self.rating_threshold;

        debug!(generation, title = %movie.title, "Building question");

        tokio::spawn(async move {
            // A missing poster must not stall the round
            let image_data = match images.fetch(&movie.resized_image_url()).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(error = %err, title = %movie.title, "Poster unavailable - using empty image");
                    Vec::new()
                }
            };

            let question = QuizQuestion::about_rating(&movie, image_data, rating_threshold);

            if current.load(Ordering::SeqCst) != generation {
                debug!(generation, "Discarding question for superseded request");
                return;
            }

            if events
                .send(FactoryEvent::QuestionReady {
                    generation,
                    question,
                })
                .is_err()
            {
                debug!(generation, "Question dropped - factory owner is gone");
            }
        });

        Some(generation)
    }
}
