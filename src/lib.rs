// Library crate for the movie quiz
// This file exposes the public API for the binary and integration tests

pub mod catalog;
pub mod config;
pub mod event;
pub mod question;
pub mod quiz;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use catalog::{Movie, MovieCatalogSource, StaticMovieCatalogSource};
pub use config::QuizConfig;
pub use event::{EventBus, QuizEvent};
pub use question::{QuestionFactory, QuizQuestion};
pub use quiz::{spawn_session, QuizPhase, QuizSession, SessionHandle};
pub use shared::{AppError, AppState};
pub use stats::{GameResult, StatisticService, StatisticsStore};
